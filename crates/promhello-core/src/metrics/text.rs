//! Text exposition helpers: escaping, number formatting, name validation.

use std::fmt::Write;

/// Escape a label value (`\`, `"` and newline).
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text (`\` and newline only).
pub(crate) fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a sample value or bucket bound.
///
/// Integral values keep one decimal (`1.0`) so bucket bounds read the same
/// way scrapers and other client libraries print them.
pub(crate) fn format_float(v: f64) -> String {
    if v.is_infinite() {
        return if v > 0.0 { "+Inf".into() } else { "-Inf".into() };
    }
    if v.is_nan() {
        return "NaN".into();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Render `{k1="v1",k2="v2"[,extra="x"]}`, or an empty string without labels.
pub(crate) fn label_set(keys: &[String], values: &[String], extra: Option<(&str, &str)>) -> String {
    let mut out = String::new();
    let pairs = keys
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .chain(extra);
    for (i, (k, v)) in pairs.enumerate() {
        out.push(if i == 0 { '{' } else { ',' });
        let _ = write!(out, "{}=\"{}\"", k, escape_label(v));
    }
    if !out.is_empty() {
        out.push('}');
    }
    out
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub(crate) fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, with the `__` prefix reserved.
pub(crate) fn is_valid_label_key(key: &str) -> bool {
    if key.starts_with("__") {
        return false;
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

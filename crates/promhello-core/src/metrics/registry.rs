//! Metric family registry.
//!
//! Families are registered once at startup (`&mut self`) and the registry is
//! then shared immutably. Names are unique across the exposed sample names,
//! so a histogram `foo` also reserves `foo_bucket`, `foo_sum` and `foo_count`.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use crate::error::{PromHelloError, Result};

use super::text::{escape_help, is_valid_label_key, is_valid_metric_name};
use super::vec::{CounterVec, HistogramVec};

/// Default latency buckets in seconds (the usual Prometheus client defaults).
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

enum Family {
    Counter(Arc<CounterVec>),
    Histogram(Arc<HistogramVec>),
}

impl Family {
    fn type_name(&self) -> &'static str {
        match self {
            Family::Counter(_) => "counter",
            Family::Histogram(_) => "histogram",
        }
    }
}

struct Described {
    name: String,
    help: String,
    family: Family,
}

/// Explicitly constructed metrics registry.
#[derive(Default)]
pub struct Registry {
    families: Vec<Described>,
    taken: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family. Fails if the name is already taken.
    pub fn register_counter(
        &mut self,
        name: &str,
        help: &str,
        label_keys: &[&str],
    ) -> Result<Arc<CounterVec>> {
        let keys = validate_labels(name, label_keys, false)?;
        self.claim(name, &[name])?;

        let handle = Arc::new(CounterVec::new(name.to_string(), keys));
        self.push(name, help, Family::Counter(Arc::clone(&handle)));
        Ok(handle)
    }

    /// Register a histogram family with [`DEFAULT_BUCKETS`].
    pub fn register_histogram(
        &mut self,
        name: &str,
        help: &str,
        label_keys: &[&str],
    ) -> Result<Arc<HistogramVec>> {
        self.register_histogram_with_buckets(name, help, label_keys, &DEFAULT_BUCKETS)
    }

    /// Register a histogram family with explicit upper bounds (seconds).
    pub fn register_histogram_with_buckets(
        &mut self,
        name: &str,
        help: &str,
        label_keys: &[&str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let keys = validate_labels(name, label_keys, true)?;
        validate_buckets(name, buckets)?;
        let bucket = format!("{name}_bucket");
        let sum = format!("{name}_sum");
        let count = format!("{name}_count");
        self.claim(name, &[name, bucket.as_str(), sum.as_str(), count.as_str()])?;

        let handle = Arc::new(HistogramVec::new(name.to_string(), keys, buckets.to_vec()));
        self.push(name, help, Family::Histogram(Arc::clone(&handle)));
        Ok(handle)
    }

    /// Names of registered families, in registration order.
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(|d| d.name.as_str()).collect()
    }

    /// Render every family in text exposition format, in registration order.
    ///
    /// Families without series still emit their HELP and TYPE lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.families {
            let _ = writeln!(out, "# HELP {} {}", d.name, escape_help(&d.help));
            let _ = writeln!(out, "# TYPE {} {}", d.name, d.family.type_name());
            match &d.family {
                Family::Counter(c) => c.render_series(&mut out),
                Family::Histogram(h) => h.render_series(&mut out),
            }
        }
        out
    }

    fn claim(&mut self, name: &str, exposed: &[&str]) -> Result<()> {
        if !is_valid_metric_name(name) {
            return Err(PromHelloError::InvalidMetric(format!(
                "invalid metric name: {name:?}"
            )));
        }
        if exposed.iter().any(|n| self.taken.contains(*n)) {
            return Err(PromHelloError::DuplicateMetric(name.to_string()));
        }
        self.taken.extend(exposed.iter().map(|n| n.to_string()));
        Ok(())
    }

    fn push(&mut self, name: &str, help: &str, family: Family) {
        tracing::debug!(metric = %name, kind = family.type_name(), "metric family registered");
        self.families.push(Described {
            name: name.to_string(),
            help: help.to_string(),
            family,
        });
    }
}

fn validate_labels(metric: &str, label_keys: &[&str], histogram: bool) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    for &k in label_keys {
        if !is_valid_label_key(k) {
            return Err(PromHelloError::InvalidMetric(format!(
                "{metric}: invalid label key {k:?}"
            )));
        }
        if histogram && k == "le" {
            return Err(PromHelloError::InvalidMetric(format!(
                "{metric}: label key \"le\" is reserved for histograms"
            )));
        }
        if !seen.insert(k) {
            return Err(PromHelloError::InvalidMetric(format!(
                "{metric}: duplicate label key {k:?}"
            )));
        }
    }
    Ok(label_keys.iter().map(|k| k.to_string()).collect())
}

fn validate_buckets(metric: &str, buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(PromHelloError::InvalidMetric(format!(
            "{metric}: histogram needs at least one bucket"
        )));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(PromHelloError::InvalidMetric(format!(
            "{metric}: bucket bounds must be finite (+Inf is implicit)"
        )));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(PromHelloError::InvalidMetric(format!(
            "{metric}: bucket bounds must be strictly increasing"
        )));
    }
    Ok(())
}

//! Labelled metric families backed by `DashMap` + atomics.
//!
//! Label values are passed in the order of the registered label keys and
//! stored as the series key. Series are rendered sorted by label values so the
//! exposition is deterministic regardless of shard layout.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{PromHelloError, Result};

use super::text::{format_float, label_set};

type SeriesKey = Vec<String>;

fn series_key(metric: &str, keys: &[String], values: &[&str]) -> Result<SeriesKey> {
    if keys.len() != values.len() {
        return Err(PromHelloError::LabelMismatch {
            metric: metric.to_string(),
            expected: keys.len(),
            got: values.len(),
        });
    }
    Ok(values.iter().map(|v| v.to_string()).collect())
}

/// Monotonic counter family.
#[derive(Debug)]
pub struct CounterVec {
    name: String,
    label_keys: Vec<String>,
    map: DashMap<SeriesKey, AtomicU64>,
}

impl CounterVec {
    pub(crate) fn new(name: String, label_keys: Vec<String>) -> Self {
        Self {
            name,
            label_keys,
            map: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.add(values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, values: &[&str], v: u64) -> Result<()> {
        let key = series_key(&self.name, &self.label_keys, values)?;
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value of a series (0 when it was never touched).
    pub fn get(&self, values: &[&str]) -> u64 {
        let key: SeriesKey = values.iter().map(|v| v.to_string()).collect();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Number of live series.
    pub fn series_count(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn render_series(&self, out: &mut String) {
        let mut rows: Vec<(SeriesKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (values, val) in rows {
            let labels = label_set(&self.label_keys, &values, None);
            let _ = writeln!(out, "{}{} {}", self.name, labels, val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    // Cumulative: bucket i counts every observation <= bounds[i].
    buckets: Box<[AtomicU64]>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Point-in-time view of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound in seconds, cumulative count)`, excluding `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    pub count: u64,
    /// Sum of observations in seconds.
    pub sum: f64,
}

/// Latency histogram family (seconds).
pub struct HistogramVec {
    name: String,
    label_keys: Vec<String>,
    bounds: Vec<f64>,
    map: DashMap<SeriesKey, AtomicHistogram>,
}

impl HistogramVec {
    pub(crate) fn new(name: String, label_keys: Vec<String>, bounds: Vec<f64>) -> Self {
        Self {
            name,
            label_keys,
            bounds,
            map: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Upper bounds in seconds, without `+Inf`.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Record one observation.
    pub fn observe(&self, values: &[&str], duration: Duration) -> Result<()> {
        let key = series_key(&self.name, &self.label_keys, values)?;
        let n = self.bounds.len();
        let hist = self
            .map
            .entry(key)
            .or_insert_with(|| AtomicHistogram::new(n));

        let secs = duration.as_secs_f64();
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        // Count first so a concurrent render never sees a bucket above +Inf.
        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_nanos.fetch_add(nanos, Ordering::Relaxed);
        for (i, &le) in self.bounds.iter().enumerate() {
            if secs <= le {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    pub fn snapshot(&self, values: &[&str]) -> Option<HistogramSnapshot> {
        let key: SeriesKey = values.iter().map(|v| v.to_string()).collect();
        let hist = self.map.get(&key)?;
        Some(self.snapshot_of(&hist))
    }

    /// Number of live series.
    pub fn series_count(&self) -> usize {
        self.map.len()
    }

    fn snapshot_of(&self, hist: &AtomicHistogram) -> HistogramSnapshot {
        HistogramSnapshot {
            buckets: self
                .bounds
                .iter()
                .zip(hist.buckets.iter())
                .map(|(&le, c)| (le, c.load(Ordering::Relaxed)))
                .collect(),
            count: hist.count.load(Ordering::Relaxed),
            sum: hist.sum_nanos.load(Ordering::Relaxed) as f64 / 1e9,
        }
    }

    pub(crate) fn render_series(&self, out: &mut String) {
        let mut rows: Vec<(SeriesKey, HistogramSnapshot)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), self.snapshot_of(r.value())))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (values, snap) in rows {
            for (le, count) in &snap.buckets {
                let le = format_float(*le);
                let labels = label_set(&self.label_keys, &values, Some(("le", le.as_str())));
                let _ = writeln!(out, "{}_bucket{} {}", self.name, labels, count);
            }
            // +Inf is the total count by definition.
            let labels = label_set(&self.label_keys, &values, Some(("le", "+Inf")));
            let _ = writeln!(out, "{}_bucket{} {}", self.name, labels, snap.count);

            let labels = label_set(&self.label_keys, &values, None);
            let _ = writeln!(out, "{}_sum{} {}", self.name, labels, format_float(snap.sum));
            let _ = writeln!(out, "{}_count{} {}", self.name, labels, snap.count);
        }
    }
}

impl std::fmt::Debug for HistogramVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistogramVec")
            .field("name", &self.name)
            .field("label_keys", &self.label_keys)
            .field("bounds", &self.bounds)
            .field("series", &self.map.len())
            .finish()
    }
}

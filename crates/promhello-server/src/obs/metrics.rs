//! Request metric families.
//!
//! Two families labelled by `method` and `endpoint`: a request counter and a
//! latency histogram in seconds. Both are registered once on the app registry
//! and recorded together by the after-request hook.

use std::sync::Arc;
use std::time::Duration;

use promhello_core::error::Result;
use promhello_core::metrics::{CounterVec, HistogramVec, Registry};

pub const REQUESTS_TOTAL: &str = "app_requests_total";
pub const REQUEST_LATENCY: &str = "app_request_latency_seconds";
pub const LABEL_KEYS: [&str; 2] = ["method", "endpoint"];

pub struct RequestMetrics {
    pub requests: Arc<CounterVec>,
    pub latency: Arc<HistogramVec>,
}

impl RequestMetrics {
    /// Register both families. Fails on a name clash (fatal at startup).
    pub fn register(registry: &mut Registry, buckets: &[f64]) -> Result<Self> {
        let requests =
            registry.register_counter(REQUESTS_TOTAL, "Total requests per route", &LABEL_KEYS)?;
        let latency = registry.register_histogram_with_buckets(
            REQUEST_LATENCY,
            "Response time per route",
            &LABEL_KEYS,
            buckets,
        )?;
        Ok(Self { requests, latency })
    }

    /// One counter increment and one latency observation, same labels.
    pub fn record(&self, method: &str, endpoint: &str, latency: Duration) -> Result<()> {
        let labels = [method, endpoint];
        self.requests.inc(&labels)?;
        self.latency.observe(&labels, latency)
    }

    /// Requests counted for a route so far.
    pub fn requests_for(&self, method: &str, endpoint: &str) -> u64 {
        self.requests.get(&[method, endpoint])
    }
}

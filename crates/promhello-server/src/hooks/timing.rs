use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;

use crate::obs::metrics::RequestMetrics;

use super::chain::{AfterRequest, BeforeRequest};
use super::context::RequestContext;

/// Stamps the request start on the context.
pub struct StartTimer;

impl BeforeRequest for StartTimer {
    fn before_request(&self, ctx: &mut RequestContext) {
        ctx.mark_started(Instant::now());
    }
}

/// Counts the request and observes its latency, labelled by method and path.
pub struct RecordMetrics {
    metrics: Arc<RequestMetrics>,
}

impl RecordMetrics {
    pub fn new(metrics: Arc<RequestMetrics>) -> Self {
        Self { metrics }
    }
}

impl AfterRequest for RecordMetrics {
    fn after_request(&self, ctx: &RequestContext, status: StatusCode) {
        // No start stamp means the before-hooks never ran for this request.
        let Some(latency) = ctx.elapsed() else {
            tracing::warn!(method = %ctx.method(), path = %ctx.path(), "request finished without a start time, not recorded");
            return;
        };

        if let Err(e) = self.metrics.record(ctx.method().as_str(), ctx.path(), latency) {
            tracing::error!(code = e.kind().as_str(), error = %e, "failed to record request metrics");
            return;
        }

        tracing::debug!(
            method = %ctx.method(),
            path = %ctx.path(),
            status = status.as_u16(),
            latency_us = latency.as_micros() as u64,
            "request served"
        );
    }
}

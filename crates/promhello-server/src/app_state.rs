//! Shared application state.
//!
//! Owns the config, the metrics registry and the hook chain. Everything is
//! built once in `AppState::new` and shared behind an `Arc`; startup errors
//! (bad metric definitions, duplicate names) are returned, not panicked.

use std::sync::Arc;

use promhello_core::error::Result;
use promhello_core::metrics::Registry;

use crate::config::AppConfig;
use crate::hooks::{HookChain, RecordMetrics, StartTimer};
use crate::obs::metrics::RequestMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    registry: Registry,
    request_metrics: Arc<RequestMetrics>,
    hooks: HookChain,
}

impl AppState {
    /// Build application state.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        // 1) Metric families
        let mut registry = Registry::new();
        let request_metrics = Arc::new(RequestMetrics::register(
            &mut registry,
            &cfg.metrics.buckets,
        )?);

        // 2) Hooks
        let mut hooks = HookChain::new();
        hooks
            .on_before_request(Arc::new(StartTimer))
            .on_after_request(Arc::new(RecordMetrics::new(Arc::clone(&request_metrics))));

        tracing::debug!(families = ?registry.family_names(), "app state ready");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                request_metrics,
                hooks,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn request_metrics(&self) -> Arc<RequestMetrics> {
        Arc::clone(&self.inner.request_metrics)
    }

    pub fn hooks(&self) -> &HookChain {
        &self.inner.hooks
    }
}

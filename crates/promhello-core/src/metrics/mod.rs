//! In-process metrics registry with Prometheus text rendering.
//!
//! A `Registry` is constructed explicitly at startup, families are registered
//! on it once, and the resulting handles are shared (`Arc`) with whoever records
//! samples. Series are created lazily per label-value combination and stored as
//! atomics inside a `DashMap`, so concurrent writers never lose updates and
//! rendering only needs a shared reference.

mod registry;
mod text;
mod vec;

pub use registry::{Registry, DEFAULT_BUCKETS};
pub use vec::{CounterVec, HistogramSnapshot, HistogramVec};

/// Content type of the text exposition format (version 0.0.4).
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

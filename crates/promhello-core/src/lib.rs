//! promhello core: error surface and the in-process metrics registry.
//!
//! This crate owns the metric families, their label handling and the
//! Prometheus text rendering. It carries no HTTP or runtime dependencies so the
//! registry can be exercised directly from tests and reused by other front ends.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad metric definitions and label mismatches surface as `PromHelloError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{PromHelloError, Result};

//! Observability: request metric families and log setup.
//!
//! The families live in the registry owned by `AppState` and are rendered by the
//! `/metrics` handler.

pub mod logging;
pub mod metrics;

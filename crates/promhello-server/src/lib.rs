//! promhello server library entry.
//!
//! This crate wires the config, the metrics registry, the request hooks and the
//! two HTTP handlers into an axum router. It is consumed by the binary
//! (`main.rs`) and by integration tests, which drive the router in-process.

pub mod app_state;
pub mod config;
pub mod hooks;
pub mod obs;
pub mod ops;
pub mod router;

//! Request lifecycle hooks.
//!
//! Every request gets its own `RequestContext`. Before-hooks run on it ahead of
//! the handler, after-hooks run once the response exists and before it is
//! returned to the server. The built-in pair (`StartTimer` + `RecordMetrics`)
//! implements request counting and latency measurement.

pub mod chain;
pub mod context;
pub mod middleware;
pub mod timing;

pub use chain::{AfterRequest, BeforeRequest, HookChain};
pub use context::RequestContext;
pub use timing::{RecordMetrics, StartTimer};

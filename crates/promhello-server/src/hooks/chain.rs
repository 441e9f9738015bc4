use std::sync::Arc;

use axum::http::StatusCode;

use super::context::RequestContext;

/// Runs before the handler; may annotate the context.
pub trait BeforeRequest: Send + Sync {
    fn before_request(&self, ctx: &mut RequestContext);
}

/// Runs after the handler produced a response, before it is sent.
pub trait AfterRequest: Send + Sync {
    fn after_request(&self, ctx: &RequestContext, status: StatusCode);
}

/// Ordered hook registrations. Built at startup, immutable afterwards.
#[derive(Clone, Default)]
pub struct HookChain {
    before: Vec<Arc<dyn BeforeRequest>>,
    after: Vec<Arc<dyn AfterRequest>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_request(&mut self, hook: Arc<dyn BeforeRequest>) -> &mut Self {
        self.before.push(hook);
        self
    }

    pub fn on_after_request(&mut self, hook: Arc<dyn AfterRequest>) -> &mut Self {
        self.after.push(hook);
        self
    }

    /// Before-hooks, in registration order.
    pub fn run_before(&self, ctx: &mut RequestContext) {
        for h in &self.before {
            h.before_request(ctx);
        }
    }

    /// After-hooks, in registration order.
    pub fn run_after(&self, ctx: &RequestContext, status: StatusCode) {
        for h in &self.after {
            h.after_request(ctx, status);
        }
    }

    /// `(before, after)` registration counts.
    pub fn counts(&self) -> (usize, usize) {
        (self.before.len(), self.after.len())
    }
}

//! Axum middleware that drives the `HookChain` around each request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

use super::context::RequestContext;

/// Before-hooks, handler, after-hooks; exactly once each per request.
///
/// Installed with `from_fn_with_state` on the whole router, so unmatched routes
/// (axum's default 404) pass through here as well.
pub async fn run_hooks(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut ctx = RequestContext::new(req.method().clone(), req.uri().path());
    let hooks = state.hooks();

    hooks.run_before(&mut ctx);
    let response = next.run(req).await;
    hooks.run_after(&ctx, response.status());

    response
}

//! Axum router wiring.
//!
//! Two static routes; the hook middleware wraps all of them and the default
//! fallback.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, hooks, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::greeting))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), hooks::middleware::run_hooks))
        .with_state(state)
}

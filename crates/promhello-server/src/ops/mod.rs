//! HTTP endpoints.
//!
//! - `/`        : greeting
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use promhello_core::metrics::TEXT_CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn greeting(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, state.cfg().server.greeting.clone())
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

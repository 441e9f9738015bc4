//! End-to-end behaviour of the router: greeting, exposition, and the
//! request hooks counting every route (including `/metrics` itself).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures_util::future::join_all;
use tower::ServiceExt;

use promhello_server::app_state::AppState;
use promhello_server::config::AppConfig;
use promhello_server::router::build_router;

fn app() -> (AppState, Router) {
    let state = AppState::new(AppConfig::default()).expect("state");
    let router = build_router(state.clone());
    (state, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn greeting_returns_fixed_text() {
    let (_, router) = app();

    let (status, content_type, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, world!");
    assert!(content_type.unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn metrics_before_any_request_declares_both_families() {
    let (_, router) = app();

    let (status, content_type, body) = get(&router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type.as_deref(),
        Some("text/plain; version=0.0.4; charset=utf-8")
    );
    assert!(body.contains("# HELP app_requests_total "));
    assert!(body.contains("# TYPE app_requests_total counter\n"));
    assert!(body.contains("# HELP app_request_latency_seconds "));
    assert!(body.contains("# TYPE app_request_latency_seconds histogram\n"));
    // The scrape being served is recorded only after its body is rendered.
    assert!(!body.contains("app_requests_total{"));
}

#[tokio::test]
async fn greeting_then_metrics_shows_one_request() {
    let (_, router) = app();

    get(&router, "/").await;
    let (_, _, body) = get(&router, "/metrics").await;

    assert!(
        body.contains("app_requests_total{method=\"GET\",endpoint=\"/\"} 1\n"),
        "{body}"
    );
    assert!(body.contains("app_request_latency_seconds_count{method=\"GET\",endpoint=\"/\"} 1\n"));
    assert!(body.contains(
        "app_request_latency_seconds_bucket{method=\"GET\",endpoint=\"/\",le=\"+Inf\"} 1\n"
    ));
    assert!(body.contains("app_request_latency_seconds_sum{method=\"GET\",endpoint=\"/\"} "));
}

#[tokio::test]
async fn metrics_endpoint_measures_itself() {
    let (_, router) = app();

    get(&router, "/metrics").await;
    let (_, _, body) = get(&router, "/metrics").await;

    assert!(
        body.contains("app_requests_total{method=\"GET\",endpoint=\"/metrics\"} 1\n"),
        "{body}"
    );
}

#[tokio::test]
async fn sequential_requests_are_counted_exactly() {
    let (state, router) = app();
    let metrics = state.request_metrics();

    let mut last_sum = 0.0;
    for n in 1..=25u64 {
        get(&router, "/").await;
        assert_eq!(metrics.requests_for("GET", "/"), n);

        let snap = metrics.latency.snapshot(&["GET", "/"]).expect("series");
        assert_eq!(snap.count, n);
        assert!(snap.sum >= last_sum);
        last_sum = snap.sum;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_do_not_lose_updates() {
    const K: usize = 200;
    let (state, router) = app();

    let tasks = (0..K).map(|_| {
        let router = router.clone();
        tokio::spawn(async move {
            let req = Request::builder().uri("/").body(Body::empty()).unwrap();
            router.oneshot(req).await.unwrap().status()
        })
    });
    for status in join_all(tasks).await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let metrics = state.request_metrics();
    assert_eq!(metrics.requests_for("GET", "/"), K as u64);
    assert_eq!(metrics.latency.snapshot(&["GET", "/"]).unwrap().count, K as u64);
}

#[tokio::test]
async fn unmatched_routes_are_measured_too() {
    let (state, router) = app();

    let (status, _, _) = get(&router, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.request_metrics().requests_for("GET", "/nope"), 1);
}

#[tokio::test]
async fn query_string_is_not_part_of_the_endpoint_label() {
    let (state, router) = app();

    get(&router, "/?name=x").await;
    assert_eq!(state.request_metrics().requests_for("GET", "/"), 1);
}

#[tokio::test]
async fn methods_are_labelled_separately() {
    let (state, router) = app();

    let req = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    get(&router, "/").await;

    let metrics = state.request_metrics();
    assert_eq!(metrics.requests_for("POST", "/"), 1);
    assert_eq!(metrics.requests_for("GET", "/"), 1);
}

#[tokio::test]
async fn greeting_is_configurable() {
    let mut cfg = AppConfig::default();
    cfg.server.greeting = "Olá, mundo!".into();
    let router = build_router(AppState::new(cfg).unwrap());

    let (_, _, body) = get(&router, "/").await;
    assert_eq!(body, "Olá, mundo!");
}

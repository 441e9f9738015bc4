#![allow(clippy::unwrap_used)]

use promhello::core::metrics::Registry;
use promhello::server::{app_state::AppState, config::AppConfig, router::build_router};

#[test]
fn facade_exposes_core_and_server() {
    let mut reg = Registry::new();
    let c = reg.register_counter("facade_total", "facade", &[]).unwrap();
    c.inc(&[]).unwrap();
    assert!(reg.render().contains("facade_total 1\n"));

    let state = AppState::new(AppConfig::default()).unwrap();
    let _router = build_router(state);
}

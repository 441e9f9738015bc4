//! promhello server
//!
//! - `GET /`        : greeting
//! - `GET /metrics` : request count + latency per route, Prometheus text format
//!
//! Usage: `promhello-server [config.yaml]`. Without an argument,
//! `promhello.yaml` is read when present, else built-in defaults apply
//! (listen on `0.0.0.0:5000`).

use promhello_core::error::{PromHelloError, Result};
use promhello_server::{app_state, config, obs, router};

#[tokio::main]
async fn main() {
    obs::logging::init();

    if let Err(e) = run().await {
        tracing::error!(code = e.kind().as_str(), error = %e, "promhello-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(path)?,
        None => config::load_or_default(config::DEFAULT_CONFIG_PATH)?,
    };
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "promhello-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PromHelloError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PromHelloError::Internal(format!("server failed: {e}")))?;

    tracing::info!("promhello-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

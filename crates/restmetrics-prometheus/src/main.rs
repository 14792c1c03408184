//! restmetrics exporter
//!
//! Registers the REST client metrics and serves the legacy registry:
//! - `/metrics` (configurable): Prometheus text exposition
//! - `/healthz`: liveness

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use restmetrics_prometheus::{app_state, config, legacy_registry, router};

const DEFAULT_CONFIG_PATH: &str = "restmetrics.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("RESTMETRICS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, code = e.code().as_str(), error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    let listen = match cfg.exporter.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    // Duplicate registration is fatal.
    if let Err(e) = restmetrics_prometheus::init() {
        tracing::error!(code = e.code().as_str(), error = %e, "metrics init failed");
        return ExitCode::FAILURE;
    }

    let state = app_state::AppState::new(cfg, legacy_registry().clone());
    let app = router::build_router(state);

    tracing::info!(%listen, "restmetrics-exporter starting");
    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

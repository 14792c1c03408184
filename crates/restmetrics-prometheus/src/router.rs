//! Axum router wiring for the exporter.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let path = state.cfg().exporter.path.clone();
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route(&path, get(ops::metrics))
        .with_state(state)
}

//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format (path configurable)

use axum::{http::StatusCode, response::{IntoResponse, Response}};
use prometheus::{Encoder, Registry, TextEncoder};

use restmetrics_core::error::{Result, RestMetricsError};

use crate::app_state::AppState;

/// Encode every family gathered from `registry` in text exposition format.
pub fn render(registry: &Registry) -> Result<String> {
    let mut buf = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buf)
        .map_err(|e| RestMetricsError::Internal(format!("encode metrics failed: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| RestMetricsError::Internal(format!("metrics not utf-8: {e}")))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    match render(state.registry()) {
        Ok(body) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "metrics scrape failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

//! Process-wide registration of the REST client metrics.
//!
//! `init()` runs once at startup: it builds the instruments (TTL gauge at
//! `+Inf`), registers them with the legacy registry and installs the adapters
//! as the client's active hooks. A second call fails fast.

use std::sync::OnceLock;

use prometheus::Registry;

use restmetrics_core::error::{Result, RestMetricsError};
use restmetrics_core::hooks;

use crate::instruments::RestClientMetrics;

static LEGACY_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry scraped by the exporter.
pub fn legacy_registry() -> &'static Registry {
    LEGACY_REGISTRY.get_or_init(Registry::new)
}

/// Register the REST client metrics with the legacy registry and install the
/// hooks.
pub fn init() -> Result<()> {
    install(legacy_registry())
}

/// Same as [`init`] against an explicit registry.
///
/// Hooks are still installed process-wide, so this can succeed at most once
/// per process. On any failure `registry` is left as it was.
pub fn install(registry: &Registry) -> Result<()> {
    if hooks::is_registered() {
        let e = RestMetricsError::AlreadyRegistered("rest client metric hooks".into());
        tracing::error!(error = %e, "rest client hook installation failed");
        return Err(e);
    }

    let metrics = RestClientMetrics::new()?;
    metrics.register(registry).inspect_err(|e| {
        tracing::error!(error = %e, "rest client metrics registration failed");
    })?;
    // fails only if another installer won the race since the check above
    hooks::register(metrics.hooks()).inspect_err(|e| {
        metrics.unregister(registry);
        tracing::error!(error = %e, "rest client hook installation failed");
    })?;

    tracing::info!("rest client metric hooks installed");
    Ok(())
}

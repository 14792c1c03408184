//! Shared state of the exporter server.

use std::sync::Arc;

use prometheus::Registry;

use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Registry,
}

impl AppState {
    /// `registry` is a handle; clones share the same collectors.
    pub fn new(cfg: ExporterConfig, registry: Registry) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}

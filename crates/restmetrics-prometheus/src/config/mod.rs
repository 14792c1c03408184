//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;

use restmetrics_core::error::{Result, RestMetricsError};

pub use schema::{ExporterConfig, ExporterSection};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RestMetricsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| RestMetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

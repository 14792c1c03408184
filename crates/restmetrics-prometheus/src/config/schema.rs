use std::net::SocketAddr;

use serde::Deserialize;
use restmetrics_core::error::{Result, RestMetricsError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RestMetricsError::UnsupportedVersion);
        }

        self.exporter.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(RestMetricsError::BadConfig(
                "exporter.path must start with '/' and name a route".into(),
            ));
        }
        if self.path == "/healthz" {
            return Err(RestMetricsError::BadConfig(
                "exporter.path must not shadow /healthz".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RestMetricsError::BadConfig(format!("exporter.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}
fn default_path() -> String {
    "/metrics".into()
}

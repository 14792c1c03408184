//! Hook implementations backed by the prometheus instruments.

use std::sync::Arc;
use std::time::Duration;

use prometheus::{Gauge, Histogram, HistogramVec, IntCounterVec};
use url::Url;

use restmetrics_core::hooks::RegisterOpts;
use restmetrics_core::{DurationMetric, ExpiryMetric, LatencyMetric, ResultMetric};

use crate::instruments::RestClientMetrics;

/// Dual-writes every latency observation into the current and the deprecated
/// histogram.
pub struct LatencyAdapter {
    m: HistogramVec,
    dm: HistogramVec,
}

impl LatencyMetric for LatencyAdapter {
    fn observe(&self, verb: &str, url: &Url, latency: Duration) {
        let url = url.as_str();
        let secs = latency.as_secs_f64();
        self.m.with_label_values(&[verb, url]).observe(secs);
        self.dm.with_label_values(&[verb, url]).observe(secs);
    }
}

pub struct ResultAdapter {
    m: IntCounterVec,
}

impl ResultMetric for ResultAdapter {
    fn increment(&self, code: &str, method: &str, host: &str) {
        self.m.with_label_values(&[code, method, host]).inc();
    }
}

pub struct TtlAdapter {
    m: Gauge,
}

impl ExpiryMetric for TtlAdapter {
    fn set(&self, ttl: Option<chrono::Duration>) {
        match ttl {
            None => self.m.set(f64::INFINITY),
            Some(d) => self.m.set(signed_seconds(d)),
        }
    }
}

pub struct RotationAdapter {
    m: Histogram,
}

impl DurationMetric for RotationAdapter {
    fn observe(&self, duration: Duration) {
        self.m.observe(duration.as_secs_f64());
    }
}

/// Seconds of a signed duration, sub-second part included.
pub fn signed_seconds(d: chrono::Duration) -> f64 {
    // subsec_nanos carries the sign of the duration
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) / 1e9
}

impl RestClientMetrics {
    /// The four hook implementations wired to these instruments.
    pub fn hooks(&self) -> RegisterOpts {
        RegisterOpts {
            client_cert_ttl: Some(Arc::new(TtlAdapter {
                m: self.exec_plugin_cert_ttl.clone(),
            })),
            client_cert_rotation_age: Some(Arc::new(RotationAdapter {
                m: self.exec_plugin_cert_rotation.clone(),
            })),
            request_latency: Some(Arc::new(LatencyAdapter {
                m: self.request_latency.clone(),
                dm: self.deprecated_request_latency.clone(),
            })),
            request_result: Some(Arc::new(ResultAdapter {
                m: self.request_result.clone(),
            })),
        }
    }
}

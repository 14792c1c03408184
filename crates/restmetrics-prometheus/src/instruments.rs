//! REST client metric instruments.
//!
//! Names, label sets, help texts and buckets are a compatibility surface for
//! dashboards and alerts; keep them stable.

use prometheus::core::Collector;
use prometheus::{
    exponential_buckets, Gauge, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts,
    Registry,
};

use restmetrics_core::error::{Result, RestMetricsError};

pub const REQUEST_DURATION: &str = "rest_client_request_duration_seconds";
pub const REQUEST_LATENCY_DEPRECATED: &str = "rest_client_request_latency_seconds";
pub const REQUESTS_TOTAL: &str = "rest_client_requests_total";
pub const EXEC_PLUGIN_TTL: &str = "rest_client_exec_plugin_ttl_seconds";
pub const EXEC_PLUGIN_ROTATION_AGE: &str = "rest_client_exec_plugin_certificate_rotation_age";

/// Version in which `rest_client_request_latency_seconds` was deprecated.
pub const LATENCY_DEPRECATED_VERSION: &str = "1.14.0";

const LATENCY_HELP: &str = "Request latency in seconds. Broken down by verb and URL.";
const REQUESTS_HELP: &str =
    "Number of HTTP requests, partitioned by status code, method, and host.";
const TTL_HELP: &str = "Gauge of the shortest TTL (time-to-live) of the client \
    certificate(s) managed by the auth exec plugin. The value \
    is in seconds until certificate expiry. If auth exec \
    plugins are unused or manage no TLS certificates, the \
    value will be +INF.";
const ROTATION_HELP: &str = "Histogram of the number of seconds the last auth exec \
    plugin client certificate lived before being rotated. \
    If auth exec plugin client certificates are unused, \
    histogram will contain no data.";

// 10-60 minutes: rotating too quickly.
// 4 hours - 1 month: ideal cadence.
// 3 months - 4 years: too slow or much too slow.
pub const ROTATION_AGE_BUCKETS: [f64; 11] = [
    600.0,         // 10 minutes
    1_800.0,       // 30 minutes
    3_600.0,       // 1 hour
    14_400.0,      // 4 hours
    86_400.0,      // 1 day
    604_800.0,     // 1 week
    2_592_000.0,   // 1 month
    7_776_000.0,   // 3 months
    15_552_000.0,  // 6 months
    31_104_000.0,  // 1 year
    124_416_000.0, // 4 years
];

/// Latency buckets: 1ms doubling ten times (1ms .. 512ms).
pub fn latency_buckets() -> Result<Vec<f64>> {
    exponential_buckets(0.001, 2.0, 10).map_err(registry_error)
}

/// Stability level every REST client instrument is exported with.
pub const STABILITY_LEVEL: &str = "ALPHA";

/// Help text as exported: stability level first.
pub fn stable_help(help: &str) -> String {
    format!("[{STABILITY_LEVEL}] {help}")
}

/// Help text of a deprecated instrument.
pub fn deprecated_help(since: &str, help: &str) -> String {
    stable_help(&format!("(Deprecated since {since}) {help}"))
}

/// The five REST client instruments.
///
/// Cloning is cheap: every instrument is an `Arc` around shared atomics, so
/// clones registered into a registry and clones held by adapters observe the
/// same series.
#[derive(Clone)]
pub struct RestClientMetrics {
    pub(crate) request_latency: HistogramVec,
    pub(crate) deprecated_request_latency: HistogramVec,
    pub(crate) request_result: IntCounterVec,
    pub(crate) exec_plugin_cert_ttl: Gauge,
    pub(crate) exec_plugin_cert_rotation: Histogram,
}

impl RestClientMetrics {
    /// Build all instruments. The TTL gauge starts at `+Inf`.
    pub fn new() -> Result<Self> {
        let request_latency = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, stable_help(LATENCY_HELP))
                .buckets(latency_buckets()?),
            &["verb", "url"],
        )
        .map_err(registry_error)?;

        let deprecated_request_latency = HistogramVec::new(
            HistogramOpts::new(
                REQUEST_LATENCY_DEPRECATED,
                deprecated_help(LATENCY_DEPRECATED_VERSION, LATENCY_HELP),
            )
            .buckets(latency_buckets()?),
            &["verb", "url"],
        )
        .map_err(registry_error)?;

        let request_result = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, stable_help(REQUESTS_HELP)),
            &["code", "method", "host"],
        )
        .map_err(registry_error)?;

        let exec_plugin_cert_ttl = Gauge::with_opts(Opts::new(EXEC_PLUGIN_TTL, stable_help(TTL_HELP)))
            .map_err(registry_error)?;
        exec_plugin_cert_ttl.set(f64::INFINITY);

        let exec_plugin_cert_rotation = Histogram::with_opts(
            HistogramOpts::new(EXEC_PLUGIN_ROTATION_AGE, stable_help(ROTATION_HELP))
                .buckets(ROTATION_AGE_BUCKETS.to_vec()),
        )
        .map_err(registry_error)?;

        Ok(Self {
            request_latency,
            deprecated_request_latency,
            request_result,
            exec_plugin_cert_ttl,
            exec_plugin_cert_rotation,
        })
    }

    /// Register every instrument with `registry`.
    ///
    /// A name already present in the registry fails with
    /// `AlreadyRegistered`. Either all five instruments end up registered or
    /// none of them do: on failure the ones added so far are removed again.
    pub fn register(&self, registry: &Registry) -> Result<()> {
        let mut added = 0;
        for c in self.collectors() {
            if let Err(e) = registry.register(c) {
                for c in self.collectors().into_iter().take(added) {
                    let _ = registry.unregister(c);
                }
                return Err(registry_error(e));
            }
            added += 1;
        }

        tracing::info!(instruments = added, "rest client metrics registered");
        Ok(())
    }

    /// Remove every instrument from `registry`. Missing ones are skipped.
    pub fn unregister(&self, registry: &Registry) {
        for c in self.collectors() {
            let _ = registry.unregister(c);
        }
    }

    fn collectors(&self) -> Vec<Box<dyn Collector>> {
        vec![
            Box::new(self.request_latency.clone()),
            Box::new(self.deprecated_request_latency.clone()),
            Box::new(self.request_result.clone()),
            Box::new(self.exec_plugin_cert_ttl.clone()),
            Box::new(self.exec_plugin_cert_rotation.clone()),
        ]
    }
}

fn registry_error(e: prometheus::Error) -> RestMetricsError {
    match e {
        prometheus::Error::AlreadyReg => {
            RestMetricsError::AlreadyRegistered("rest client metric instrument".into())
        }
        other => RestMetricsError::Registration(other.to_string()),
    }
}

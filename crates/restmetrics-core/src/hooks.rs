//! Instrumentation hooks invoked by the REST client.
//!
//! The client calls the accessors below (`request_latency()`, ...) inline on
//! the request path. A metrics backend installs its implementations once at
//! startup through [`register`]; until then every accessor returns a no-op.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use url::Url;

use crate::error::{Result, RestMetricsError};

/// Observes the latency of a request, keyed by verb and destination URL.
pub trait LatencyMetric: Send + Sync {
    fn observe(&self, verb: &str, url: &Url, latency: Duration);
}

/// Counts request results by status code, method and host.
pub trait ResultMetric: Send + Sync {
    fn increment(&self, code: &str, method: &str, host: &str);
}

/// Reports the remaining lifetime of the exec-plugin client certificate.
///
/// `None` means no certificate is managed or the TTL is unknown. The value is
/// signed: an already expired certificate yields a negative TTL.
pub trait ExpiryMetric: Send + Sync {
    fn set(&self, ttl: Option<chrono::Duration>);
}

/// Observes a plain duration (certificate rotation age).
pub trait DurationMetric: Send + Sync {
    fn observe(&self, duration: Duration);
}

/// Hook implementations handed to [`register`]. Unset fields keep the no-op.
#[derive(Clone, Default)]
pub struct RegisterOpts {
    pub client_cert_ttl: Option<Arc<dyn ExpiryMetric>>,
    pub client_cert_rotation_age: Option<Arc<dyn DurationMetric>>,
    pub request_latency: Option<Arc<dyn LatencyMetric>>,
    pub request_result: Option<Arc<dyn ResultMetric>>,
}

/// Default implementation of every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetric;

impl LatencyMetric for NoopMetric {
    fn observe(&self, _verb: &str, _url: &Url, _latency: Duration) {}
}

impl ResultMetric for NoopMetric {
    fn increment(&self, _code: &str, _method: &str, _host: &str) {}
}

impl ExpiryMetric for NoopMetric {
    fn set(&self, _ttl: Option<chrono::Duration>) {}
}

impl DurationMetric for NoopMetric {
    fn observe(&self, _duration: Duration) {}
}

static NOOP: NoopMetric = NoopMetric;
static ACTIVE: OnceLock<RegisterOpts> = OnceLock::new();

/// Install hook implementations for the whole process.
///
/// Only the first call takes effect; any later call fails with
/// `AlreadyRegistered` and leaves the installed hooks untouched.
pub fn register(opts: RegisterOpts) -> Result<()> {
    let installed = [
        opts.client_cert_ttl.is_some(),
        opts.client_cert_rotation_age.is_some(),
        opts.request_latency.is_some(),
        opts.request_result.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();

    ACTIVE
        .set(opts)
        .map_err(|_| RestMetricsError::AlreadyRegistered("rest client metric hooks".into()))?;

    tracing::debug!(installed, "rest client metric hooks registered");
    Ok(())
}

/// Whether [`register`] has already run in this process.
pub fn is_registered() -> bool {
    ACTIVE.get().is_some()
}

/// Active latency hook.
pub fn request_latency() -> &'static dyn LatencyMetric {
    let noop: &'static dyn LatencyMetric = &NOOP;
    ACTIVE
        .get()
        .and_then(|o| o.request_latency.as_deref())
        .unwrap_or(noop)
}

/// Active request result hook.
pub fn request_result() -> &'static dyn ResultMetric {
    let noop: &'static dyn ResultMetric = &NOOP;
    ACTIVE
        .get()
        .and_then(|o| o.request_result.as_deref())
        .unwrap_or(noop)
}

/// Active exec-plugin certificate TTL hook.
pub fn client_cert_ttl() -> &'static dyn ExpiryMetric {
    let noop: &'static dyn ExpiryMetric = &NOOP;
    ACTIVE
        .get()
        .and_then(|o| o.client_cert_ttl.as_deref())
        .unwrap_or(noop)
}

/// Active certificate rotation age hook.
pub fn client_cert_rotation_age() -> &'static dyn DurationMetric {
    let noop: &'static dyn DurationMetric = &NOOP;
    ACTIVE
        .get()
        .and_then(|o| o.client_cert_rotation_age.as_deref())
        .unwrap_or(noop)
}

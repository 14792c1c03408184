//! Prometheus backend for the REST client instrumentation hooks.
//!
//! Declares the five `rest_client_*` instruments, adapts them to the hook
//! traits of `restmetrics-core`, and registers both once per process through
//! [`init`]. A small axum exporter serves the legacy registry.

pub mod adapters;
pub mod app_state;
pub mod config;
pub mod instruments;
pub mod ops;
pub mod registration;
pub mod router;

pub use instruments::RestClientMetrics;
pub use registration::{init, install, legacy_registry};

//! restmetrics core: the instrumentation hook contract of the REST client.
//!
//! The HTTP client reports request latency, request results and exec-plugin
//! certificate lifecycle events through four small traits. Until a backend
//! registers real implementations, every hook is a no-op. This crate carries
//! no metrics backend so the client side can depend on it alone.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Hook calls are
//! infallible; registration surfaces failures as `RestMetricsError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod hooks;

/// Shared result type.
pub use error::{Result, RestMetricsError};
pub use hooks::{
    DurationMetric, ExpiryMetric, LatencyMetric, RegisterOpts, ResultMetric,
};

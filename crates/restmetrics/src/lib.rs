//! Top-level facade crate for restmetrics.
//!
//! Re-exports the hook contract and the prometheus backend so users can depend
//! on a single crate.

pub mod core {
    pub use restmetrics_core::*;
}

pub mod prometheus {
    pub use restmetrics_prometheus::*;
}

pub use restmetrics_prometheus::init;

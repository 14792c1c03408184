//! Shared error type across restmetrics crates.

use thiserror::Error;

/// Stable error codes (used by tests and startup diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Instrument name or hook set registered twice.
    AlreadyRegistered,
    /// Registry rejected an instrument for another reason.
    Registration,
    /// Invalid exporter configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// I/O or encoding failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::Registration => "REGISTRATION",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RestMetricsError>;

/// Unified error type used by core and the prometheus integration.
#[derive(Debug, Error)]
pub enum RestMetricsError {
    #[error("already registered: {0}")]
    AlreadyRegistered(String),
    #[error("registration failed: {0}")]
    Registration(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RestMetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RestMetricsError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            RestMetricsError::Registration(_) => ErrorCode::Registration,
            RestMetricsError::BadConfig(_) => ErrorCode::BadConfig,
            RestMetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            RestMetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}

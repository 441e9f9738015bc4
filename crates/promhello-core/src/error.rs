//! Shared error type across promhello crates.

use thiserror::Error;

/// Stable error codes (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metric name registered twice.
    DuplicateMetric,
    /// Metric name, label key or bucket layout rejected.
    InvalidMetric,
    /// Label values do not match the registered label keys.
    LabelMismatch,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorKind::InvalidMetric => "INVALID_METRIC",
            ErrorKind::LabelMismatch => "LABEL_MISMATCH",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromHelloError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PromHelloError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("metric already registered: {0}")]
    DuplicateMetric(String),
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("label mismatch on {metric}: expected {expected} values, got {got}")]
    LabelMismatch {
        metric: String,
        expected: usize,
        got: usize,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl PromHelloError {
    /// Map to a stable error code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromHelloError::BadRequest(_) => ErrorKind::BadRequest,
            PromHelloError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            PromHelloError::DuplicateMetric(_) => ErrorKind::DuplicateMetric,
            PromHelloError::InvalidMetric(_) => ErrorKind::InvalidMetric,
            PromHelloError::LabelMismatch { .. } => ErrorKind::LabelMismatch,
            PromHelloError::Internal(_) => ErrorKind::Internal,
        }
    }
}

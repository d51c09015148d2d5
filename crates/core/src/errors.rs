//! Core error types for the investor dashboard.
//!
//! The HTTP client converts `reqwest` and `serde_json` failures into these
//! types so that nothing above the client depends on the transport crate.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard.
///
/// Every payload is a plain string so the error can be cloned into
/// [`crate::dashboard::LoadState::Failed`] and compared in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failures raised before a usable response body was obtained.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Connection(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

impl Error {
    /// True when the service reported that the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::Status { status: 404, .. })
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

//! Error types for the userdeck plugin.
//!
//! [`UserdeckError`] covers every failure the plugin can observe, from request
//! construction to response decoding and theme loading. The three fetch-related
//! kinds (`InvalidRequest`, `Transport`, `Decode`) never escape the controllers:
//! they are converted into a user-visible message at the fetch boundary.

use thiserror::Error;

/// The main error type for userdeck operations.
///
/// # Examples
///
/// ```
/// use userdeck::UserdeckError;
///
/// let err = UserdeckError::Transport("connection refused".to_string());
/// assert_eq!(err.to_string(), "Network error: connection refused");
/// ```
#[derive(Debug, Error)]
pub enum UserdeckError {
    /// The request URL could not be built from the configured base endpoint.
    ///
    /// Only reachable with a malformed `base_url`; fatal to the fetch that
    /// hit it, never to the plugin.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request failed in transit, returned a non-success status, or
    /// never completed before the request timeout.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body did not match the expected JSON schema.
    #[error("Error decoding users: {0}")]
    Decode(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for UserdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for UserdeckError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

/// A specialized `Result` type for userdeck operations.
pub type Result<T> = std::result::Result<T, UserdeckError>;

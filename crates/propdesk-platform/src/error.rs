//! Error types for platform operations.
//!
//! Categorizes outbound HTTP failures so callers can tell a missing object
//! (normalized to an empty collection) from a fatal read error, and a
//! rejected token from a transport failure.

use thiserror::Error;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error types for platform client operations.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// Client handle could not be constructed from the given configuration.
    #[error("platform configuration invalid: {message}")]
    Configuration {
        /// What was wrong with the configuration
        message: String,
    },

    /// The auth service rejected the token or returned no user.
    #[error("token rejected by auth service")]
    Unauthorized,

    /// The requested object does not exist.
    #[error("object not found: {bucket}/{key}")]
    NotFound {
        /// Bucket the object was looked up in
        bucket: String,
        /// Object key within the bucket
        key: String,
    },

    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// The platform answered with a non-success status.
    #[error("unexpected response: HTTP {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the platform
        status: u16,
        /// Response body content, truncated
        body: String,
    },
}

impl PlatformError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }
}

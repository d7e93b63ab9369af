//! Shared outbound HTTP plumbing for platform handles.

use std::time::Duration;

use crate::error::{PlatformError, Result};

/// Configuration for outbound platform clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: "Propdesk/1.0".to_string() }
    }
}

/// Builds the reqwest client a platform handle runs on.
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| PlatformError::configuration(format!("failed to build HTTP client: {e}")))
}

/// Rejects a missing or empty credential at construction time.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlatformError::configuration(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Normalizes the base URL so endpoint paths can be appended directly.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Maps reqwest transport failures onto the platform error taxonomy.
pub(crate) fn categorize_send_error(error: &reqwest::Error, timeout: Duration) -> PlatformError {
    if error.is_timeout() {
        return PlatformError::timeout(timeout.as_secs());
    }
    if error.is_connect() {
        return PlatformError::network(format!("connection failed: {error}"));
    }
    PlatformError::network(error.to_string())
}

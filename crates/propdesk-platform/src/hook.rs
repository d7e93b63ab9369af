//! Redeploy hook client.
//!
//! The hook tells the downstream build pipeline to republish after a
//! successful mutation. It is strictly best-effort: the mutation already
//! happened, so a hook failure is logged and never surfaced.

use serde_json::json;
use tracing::{debug, warn};

use crate::{
    client::{build_http_client, categorize_send_error, require, ClientConfig},
    error::{PlatformError, Result},
};

/// Client handle for the redeploy webhook.
#[derive(Debug, Clone)]
pub struct HookClient {
    http: reqwest::Client,
    url: String,
    config: ClientConfig,
}

impl HookClient {
    /// Creates a hook client with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Configuration` when the URL is empty.
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(url, ClientConfig::default())
    }

    /// Creates a hook client with explicit HTTP settings.
    pub fn with_config(url: &str, config: ClientConfig) -> Result<Self> {
        require("redeploy hook URL", url)?;

        let http = build_http_client(&config)?;
        Ok(Self { http, url: url.to_string(), config })
    }

    /// URL this hook posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts to the hook and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Timeout`, or `UnexpectedStatus` when the hook
    /// endpoint does not accept the POST.
    pub async fn trigger(&self) -> Result<()> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| categorize_send_error(&e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::UnexpectedStatus { status: status.as_u16(), body });
        }

        debug!("redeploy hook accepted");
        Ok(())
    }

    /// Fires the hook without waiting for the result.
    ///
    /// Runs the POST on a detached task. Failures are logged at warn level
    /// and never reach the caller.
    pub fn fire(&self) {
        let hook = self.clone();
        tokio::spawn(async move {
            match hook.trigger().await {
                Ok(()) => debug!(url = %hook.url, "redeploy hook delivered"),
                Err(e) => warn!(url = %hook.url, error = %e, "redeploy hook failed"),
            }
        });
    }
}

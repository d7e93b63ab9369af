//! Token verification against the platform auth service.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    client::{build_http_client, categorize_send_error, normalize_base_url, require, ClientConfig},
    error::{PlatformError, Result},
};

/// The user record returned by the auth service for a verified token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Platform-assigned user identifier.
    pub id: String,
    /// Email the user signed up with, when present.
    #[serde(default)]
    pub email: Option<String>,
    /// Platform role, when present.
    #[serde(default)]
    pub role: Option<String>,
}

/// Client handle for token verification, bound to the public (anon) key.
///
/// This handle never touches storage; it exists so that end-user tokens are
/// checked with end-user privileges.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    config: ClientConfig,
}

impl AuthClient {
    /// Creates an auth client with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Configuration` when the base URL or anon key
    /// is missing or empty. This is the factory's fail-fast guard: the
    /// process must not start without platform credentials.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        Self::with_config(base_url, anon_key, ClientConfig::default())
    }

    /// Creates an auth client with explicit HTTP settings.
    pub fn with_config(base_url: &str, anon_key: &str, config: ClientConfig) -> Result<Self> {
        require("platform base URL", base_url)?;
        require("platform anon key", anon_key)?;

        let http = build_http_client(&config)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            anon_key: anon_key.to_string(),
            config,
        })
    }

    /// Verifies a bearer token and returns the user it belongs to.
    ///
    /// Asks the auth service who the token belongs to. Any failure mode
    /// (rejected token, transport failure, a response with no usable user
    /// record) comes back as `PlatformError::Unauthorized`: the caller
    /// cannot tell them apart and must not proceed either way.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unauthorized` when the token does not map to
    /// a verified user.
    pub async fn verify_token(&self, token: &str) -> Result<AuthUser> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %categorize_send_error(&e, self.config.timeout), "auth request failed");
                PlatformError::Unauthorized
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "auth service rejected token");
            return Err(PlatformError::Unauthorized);
        }

        let user: AuthUser = response.json().await.map_err(|e| {
            warn!(error = %e, "auth service returned no usable user record");
            PlatformError::Unauthorized
        })?;

        debug!(user_id = %user.id, "token verified");
        Ok(user)
    }

    /// Base URL this handle is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

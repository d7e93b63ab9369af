//! Object storage reads and writes with the privileged service key.

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use tracing::{debug, instrument};

use crate::{
    client::{build_http_client, categorize_send_error, normalize_base_url, require, ClientConfig},
    error::{PlatformError, Result},
};

/// How much of an error response body is kept for diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Client handle for the platform object store, bound to the service key.
///
/// The service key bypasses row-level access rules, so this handle must
/// only ever run after the caller has been authorized.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    config: ClientConfig,
}

impl StorageClient {
    /// Creates a storage client with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Configuration` when the base URL or service
    /// key is missing or empty.
    pub fn new(base_url: &str, service_key: &str) -> Result<Self> {
        Self::with_config(base_url, service_key, ClientConfig::default())
    }

    /// Creates a storage client with explicit HTTP settings.
    pub fn with_config(base_url: &str, service_key: &str, config: ClientConfig) -> Result<Self> {
        require("platform base URL", base_url)?;
        require("platform service key", service_key)?;

        let http = build_http_client(&config)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            service_key: service_key.to_string(),
            config,
        })
    }

    /// Downloads an object.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` when the object does not exist;
    /// callers decide whether that is fatal. Other failures surface as
    /// `Network`, `Timeout`, or `UnexpectedStatus`.
    #[instrument(name = "storage_download", skip(self))]
    pub async fn download(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let response = self
            .http
            .get(self.object_url(bucket, key))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| categorize_send_error(&e, self.config.timeout))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("object not found");
            return Err(PlatformError::NotFound { bucket: bucket.to_string(), key: key.to_string() });
        }
        if !status.is_success() {
            return Err(self.unexpected_status(response).await);
        }

        let body = response.bytes().await.map_err(|e| PlatformError::network(e.to_string()))?;
        debug!(bytes = body.len(), "object downloaded");
        Ok(body)
    }

    /// Uploads an object, overwriting any existing content.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Timeout`, or `UnexpectedStatus` when the write
    /// does not complete.
    #[instrument(name = "storage_upload", skip(self, content), fields(bytes = content.len()))]
    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.object_url(bucket, key))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("x-upsert", "true")
            .header(CONTENT_TYPE, content_type)
            .body(content)
            .send()
            .await
            .map_err(|e| categorize_send_error(&e, self.config.timeout))?;

        if !response.status().is_success() {
            return Err(self.unexpected_status(response).await);
        }

        debug!("object uploaded");
        Ok(())
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }

    async fn unexpected_status(&self, response: reqwest::Response) -> PlatformError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        PlatformError::UnexpectedStatus { status, body }
    }
}

//! Mock platform for integration testing.
//!
//! Simulates the three external surfaces the service talks to: the auth
//! user endpoint, the storage object endpoints for the collection
//! document, and the redeploy hook receiver. All requests are recorded so
//! tests can assert on uploaded documents and hook deliveries.

use std::time::Duration;

use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer as WiremockServer, Request, ResponseTemplate,
};

/// Auth endpoint the service verifies tokens against.
const AUTH_USER_PATH: &str = "/auth/v1/user";

/// Storage object path of the collection document.
const OBJECT_PATH: &str = "/storage/v1/object/properties/properties.json";

/// Path the mock hook receiver listens on.
const HOOK_PATH: &str = "/hooks/redeploy";

/// HTTP mock server simulating the backing platform.
pub struct MockPlatform {
    server: WiremockServer,
}

impl MockPlatform {
    /// Starts a new mock platform on a random port.
    pub async fn start() -> Self {
        Self { server: WiremockServer::start().await }
    }

    /// Base URL of the mock platform.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// URL of the mock redeploy hook receiver.
    pub fn hook_url(&self) -> String {
        format!("{}{}", self.server.uri(), HOOK_PATH)
    }

    /// Verifies `token` as `email`'s session.
    pub async fn mock_verified_user(&self, token: &str, email: &str) {
        Mock::given(method("GET"))
            .and(path(AUTH_USER_PATH))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "00000000-0000-4000-8000-000000000001",
                "aud": "authenticated",
                "role": "authenticated",
                "email": email,
            })))
            .mount(&self.server)
            .await;
    }

    /// Rejects every token.
    pub async fn mock_auth_rejection(&self) {
        Mock::given(method("GET"))
            .and(path(AUTH_USER_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "invalid JWT",
            })))
            .mount(&self.server)
            .await;
    }

    /// Serves `properties` as the stored collection document.
    pub async fn mock_collection(&self, properties: &Value) {
        self.mock_collection_raw(&properties.to_string()).await;
    }

    /// Serves a raw body as the stored collection document.
    pub async fn mock_collection_raw(&self, body: &str) {
        Mock::given(method("GET"))
            .and(path(OBJECT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Reports the collection document as missing.
    pub async fn mock_collection_missing(&self) {
        Mock::given(method("GET"))
            .and(path(OBJECT_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "not_found",
                "message": "Object not found",
            })))
            .mount(&self.server)
            .await;
    }

    /// Fails collection reads with the given status.
    pub async fn mock_collection_read_error(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(OBJECT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Accepts collection uploads.
    pub async fn mock_upload_success(&self) {
        Mock::given(method("POST"))
            .and(path(OBJECT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Key": "properties/properties.json",
            })))
            .mount(&self.server)
            .await;
    }

    /// Fails collection uploads with the given status.
    pub async fn mock_upload_failure(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(OBJECT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Accepts redeploy hook deliveries.
    pub async fn mock_hook_success(&self) {
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Rejects redeploy hook deliveries.
    pub async fn mock_hook_failure(&self) {
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// All requests received by the mock platform.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Documents uploaded to the collection object, oldest first.
    ///
    /// Returns the raw text alongside the parsed JSON so tests can assert
    /// on formatting as well as content.
    pub async fn uploaded_documents(&self) -> Vec<(String, Value)> {
        self.received_requests()
            .await
            .into_iter()
            .filter(|req| req.method.as_str() == "POST" && req.url.path() == OBJECT_PATH)
            .map(|req| {
                let text = String::from_utf8(req.body.clone()).expect("upload body is UTF-8");
                let value = serde_json::from_str(&text).expect("upload body is JSON");
                (text, value)
            })
            .collect()
    }

    /// Number of collection uploads received.
    pub async fn upload_count(&self) -> usize {
        self.uploaded_documents().await.len()
    }

    /// Number of token verification requests received.
    pub async fn auth_request_count(&self) -> usize {
        self.received_requests()
            .await
            .iter()
            .filter(|req| req.url.path() == AUTH_USER_PATH)
            .count()
    }

    /// Number of redeploy hook deliveries received.
    pub async fn hook_request_count(&self) -> usize {
        self.received_requests().await.iter().filter(|req| req.url.path() == HOOK_PATH).count()
    }

    /// Waits until the hook has been delivered `expected` times.
    ///
    /// The hook runs on a detached task, so tests poll rather than assume
    /// it completed before the response was written.
    pub async fn wait_for_hook_deliveries(&self, expected: usize, timeout: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let count = self.hook_request_count().await;
            if count >= expected || tokio::time::Instant::now() >= deadline {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

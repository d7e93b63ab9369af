//! Test harness for propdesk integration tests.
//!
//! Provides a mock platform (auth, storage, redeploy hook) behind real
//! HTTP, fixture builders, and a ready-to-use router wired against the
//! mock.

use std::time::Duration;

use anyhow::Result;
use axum::Router;
use propdesk_api::{create_router, AppState, Config};
use tracing_subscriber::EnvFilter;

pub mod fixtures;
pub mod platform;

pub use platform::MockPlatform;

/// Token the mock platform verifies as the allowlisted admin.
pub const ADMIN_TOKEN: &str = "valid-admin-token";

/// Email on the allowlist in the default test configuration.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Test environment with all necessary infrastructure.
pub struct TestEnv {
    /// Mock platform backing auth, storage, and the redeploy hook.
    pub platform: MockPlatform,
    /// Plain HTTP client for tests that talk to a live server.
    pub client: reqwest::Client,
}

impl TestEnv {
    /// Creates a new test environment with a running mock platform.
    pub async fn new() -> Result<Self> {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,propdesk=debug")),
            )
            .with_test_writer()
            .try_init();

        let platform = MockPlatform::start().await;
        let client = reqwest::Client::new();

        Ok(Self { platform, client })
    }

    /// A service configuration pointing at the mock platform.
    ///
    /// Fully configured: service key present, one allowlisted admin, hook
    /// wired to the mock. Tests that need a degraded deployment clear the
    /// relevant field before building state.
    pub fn config(&self) -> Config {
        Config {
            platform_url: self.platform.url(),
            platform_anon_key: "test-anon-key".to_string(),
            platform_service_key: "test-service-key".to_string(),
            admin_emails: ADMIN_EMAIL.to_string(),
            redeploy_hook_url: self.platform.hook_url(),
            ..Config::default()
        }
    }

    /// Builds application state from a configuration.
    pub fn state(&self, config: &Config) -> AppState {
        AppState::from_config(config).expect("test app state")
    }

    /// A router wired against the mock platform with default test config.
    pub fn router(&self) -> Router {
        self.router_with(&self.config())
    }

    /// A router built from a custom configuration.
    pub fn router_with(&self, config: &Config) -> Router {
        create_router(self.state(config), Duration::from_secs(30))
    }
}

//! Configuration management for the propdesk admin service.

use std::{collections::HashSet, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The platform settings accept two env-name pairs: the service's own
/// `PLATFORM_*` names and the provider's `SUPABASE_*` names, so a
/// deployment can reuse the secrets it already has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Platform
    /// Base URL of the backing platform.
    ///
    /// Environment variable: `PLATFORM_URL` (or `SUPABASE_URL`)
    #[serde(default)]
    pub platform_url: String,
    /// Public (anon) key, used only for token verification.
    ///
    /// Environment variable: `PLATFORM_ANON_KEY` (or `SUPABASE_ANON_KEY`)
    #[serde(default)]
    pub platform_anon_key: String,
    /// Privileged service key for storage reads and writes.
    ///
    /// Environment variable: `PLATFORM_SERVICE_KEY` (or
    /// `SUPABASE_SERVICE_ROLE_KEY`). Optional at startup; mutation
    /// requests fail with 500 while it is absent.
    #[serde(default)]
    pub platform_service_key: String,

    // Authorization
    /// Comma-separated admin email allowlist.
    ///
    /// Environment variable: `ADMIN_EMAILS`. Entries are trimmed and
    /// lower-cased on load.
    #[serde(default)]
    pub admin_emails: String,

    // Redeploy hook
    /// Webhook POSTed after a successful mutation. Optional.
    ///
    /// Environment variable: `REDEPLOY_HOOK_URL`
    #[serde(default)]
    pub redeploy_hook_url: String,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT_SECONDS`
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from defaults, `config.toml`, and environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a provider value cannot be deserialized or
    /// validation fails.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("").map(|key| {
                // Accept the provider's own env names alongside ours.
                let name = key.as_str();
                if name.eq_ignore_ascii_case("supabase_url") {
                    "platform_url".into()
                } else if name.eq_ignore_ascii_case("supabase_anon_key") {
                    "platform_anon_key".into()
                } else if name.eq_ignore_ascii_case("supabase_service_role_key") {
                    "platform_service_key".into()
                } else {
                    name.to_string().into()
                }
            }));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.platform_url.is_empty()
            && !self.platform_url.starts_with("http://")
            && !self.platform_url.starts_with("https://")
        {
            anyhow::bail!("platform_url must be an http(s) URL: {}", self.platform_url);
        }
        if self.request_timeout_seconds == 0 {
            anyhow::bail!("request_timeout_seconds must be positive");
        }
        Ok(())
    }

    /// Parses the server bind address.
    ///
    /// # Errors
    ///
    /// Returns an error when host and port do not form a valid address.
    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))
    }

    /// The admin allowlist: trimmed, lower-cased, empty entries dropped.
    pub fn admin_allowlist(&self) -> HashSet<String> {
        self.admin_emails
            .split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// The privileged service key, when configured.
    pub fn service_key(&self) -> Option<&str> {
        non_empty(&self.platform_service_key)
    }

    /// The redeploy hook URL, when configured.
    pub fn hook_url(&self) -> Option<&str> {
        non_empty(&self.redeploy_hook_url)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Anon key with all but a short prefix masked, for startup logging.
    pub fn anon_key_masked(&self) -> String {
        mask_secret(&self.platform_anon_key)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform_url: String::new(),
            platform_anon_key: String::new(),
            platform_service_key: String::new(),
            admin_emails: String::new(),
            redeploy_hook_url: String::new(),
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_to_loopback() {
        let config = Config::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_seconds, 30);
        assert!(config.service_key().is_none());
        assert!(config.hook_url().is_none());
        assert!(config.admin_allowlist().is_empty());
    }

    #[test]
    fn allowlist_entries_are_trimmed_and_lowercased() {
        let config = Config {
            admin_emails: " Alice@Example.com ,bob@example.com,, carol@EXAMPLE.com".to_string(),
            ..Config::default()
        };

        let allowlist = config.admin_allowlist();

        assert_eq!(allowlist.len(), 3);
        assert!(allowlist.contains("alice@example.com"));
        assert!(allowlist.contains("bob@example.com"));
        assert!(allowlist.contains("carol@example.com"));
    }

    #[test]
    fn provider_env_names_are_accepted() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SUPABASE_URL", "https://abc.supabase.co");
            jail.set_env("SUPABASE_ANON_KEY", "anon-key-value");
            jail.set_env("SUPABASE_SERVICE_ROLE_KEY", "service-key-value");

            let config = Config::load().expect("config loads");

            assert_eq!(config.platform_url, "https://abc.supabase.co");
            assert_eq!(config.platform_anon_key, "anon-key-value");
            assert_eq!(config.service_key(), Some("service-key-value"));
            Ok(())
        });
    }

    #[test]
    fn own_env_names_are_accepted() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PLATFORM_URL", "https://platform.example");
            jail.set_env("PLATFORM_ANON_KEY", "anon");
            jail.set_env("ADMIN_EMAILS", "admin@example.com");
            jail.set_env("REDEPLOY_HOOK_URL", "https://hooks.example/build");

            let config = Config::load().expect("config loads");

            assert_eq!(config.platform_url, "https://platform.example");
            assert!(config.admin_allowlist().contains("admin@example.com"));
            assert_eq!(config.hook_url(), Some("https://hooks.example/build"));
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_non_http_platform_url() {
        let config = Config { platform_url: "ftp://nope".to_string(), ..Config::default() };

        assert!(config.validate().is_err());
    }

    #[test]
    fn secrets_are_masked_for_logging() {
        let config =
            Config { platform_anon_key: "sbp_0123456789abcdef".to_string(), ..Config::default() };

        assert_eq!(config.anon_key_masked(), "sbp_***");
        assert_eq!(Config::default().anon_key_masked(), "***");
    }
}

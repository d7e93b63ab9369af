//! Propdesk admin service.
//!
//! Main entry point: initializes tracing, loads configuration, builds the
//! platform client handles, and serves the HTTP API until shutdown.

use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("Starting propdesk admin service");

    // Load configuration from defaults, config.toml, and environment
    let config = propdesk_api::Config::load()?;

    // Build platform handles; missing URL or anon key aborts startup
    let state = propdesk_api::AppState::from_config(&config)
        .context("Failed to construct platform clients")?;

    info!(
        platform_url = %config.platform_url,
        anon_key = %config.anon_key_masked(),
        admins = state.admins.len(),
        storage_configured = state.storage.is_some(),
        hook_configured = state.hook.is_some(),
        "Configuration loaded"
    );

    let addr = config.server_addr()?;

    propdesk_api::start_server(state, addr, config.request_timeout())
        .await
        .context("Server failed")?;

    info!("Propdesk shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,propdesk=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

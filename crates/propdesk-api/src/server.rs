//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with middleware stack and graceful shutdown.
//! Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement (30s default)
//! 4. Handler execution
//!
//! # Graceful Shutdown
//!
//! The server handles SIGTERM gracefully: it stops accepting new
//! connections and waits for in-flight requests before returning.

use std::{collections::HashSet, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use propdesk_platform::{AuthClient, HookClient, PlatformError, StorageClient};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{config::Config, handlers};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Token verification client, bound to the public key.
    pub auth: Arc<AuthClient>,
    /// Privileged storage client; absent until a service key is configured.
    pub storage: Option<Arc<StorageClient>>,
    /// Lower-cased emails allowed to mutate the collection.
    pub admins: Arc<HashSet<String>>,
    /// Redeploy hook, when configured.
    pub hook: Option<Arc<HookClient>>,
}

impl AppState {
    /// Builds application state from configuration.
    ///
    /// The platform URL and anon key are required here; the process must
    /// not start without them. The service key and hook URL stay optional
    /// and are checked per request.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Configuration` when a required credential is
    /// missing or a client handle cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, PlatformError> {
        let auth = AuthClient::new(&config.platform_url, &config.platform_anon_key)?;

        let storage = match config.service_key() {
            Some(key) => Some(Arc::new(StorageClient::new(&config.platform_url, key)?)),
            None => None,
        };

        let hook = match config.hook_url() {
            Some(url) => Some(Arc::new(HookClient::new(url)?)),
            None => None,
        };

        Ok(Self {
            auth: Arc::new(auth),
            storage,
            admins: Arc::new(config.admin_allowlist()),
            hook,
        })
    }
}

/// Creates the Axum router with all routes and middleware.
///
/// Sets up the admin mutation endpoint, health probes, request tracing,
/// and timeout handling.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check));

    let admin_routes = Router::new().route("/admin/properties", post(handlers::update_properties));

    Router::new()
        .merge(health_routes)
        .merge(admin_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject request ID into all responses.
///
/// Adds X-Request-Id header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the specified address and serves requests until a shutdown
/// signal is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the network
/// interface is unavailable.
pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
    request_timeout: Duration,
) -> Result<(), std::io::Error> {
    let app = create_router(state, request_timeout);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
///
/// Enables graceful shutdown on:
/// - CTRL+C (SIGINT) - Development
/// - SIGTERM - Kubernetes/Docker
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("Waiting for in-flight requests to complete");
}

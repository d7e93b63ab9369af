//! Health check handlers for service monitoring.
//!
//! Provides liveness, readiness, and health endpoints for orchestration
//! systems. The service holds no local state, so the only meaningful check
//! is whether the privileged platform handle is configured.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::server::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: HealthStatus,
    /// Timestamp when health check was performed
    pub timestamp: DateTime<Utc>,
    /// Individual component health checks
    pub checks: HealthChecks,
    /// Service version information
    pub version: String,
}

/// Overall health status enumeration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Running, but mutations cannot be served
    Degraded,
}

/// Individual component health check results.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Privileged storage handle availability
    pub storage: ComponentHealth,
}

/// Health status for individual components.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: ComponentStatus,
    /// Optional detail if unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Component-level health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is available
    Up,
    /// Component is unavailable
    Down,
}

/// Health check endpoint handler.
///
/// Called frequently by orchestration systems and load balancers, so it
/// performs no outbound requests.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage_configured = state.storage.is_some();

    let response = HealthResponse {
        status: if storage_configured { HealthStatus::Healthy } else { HealthStatus::Degraded },
        timestamp: Utc::now(),
        checks: HealthChecks {
            storage: ComponentHealth {
                status: if storage_configured { ComponentStatus::Up } else { ComponentStatus::Down },
                message: if storage_configured {
                    None
                } else {
                    Some("platform service key not configured".to_string())
                },
            },
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    debug!(status = ?response.status, "Health check completed");

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness probe.
///
/// Reports ready only when mutation requests can actually be served.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.storage.is_some() {
        (StatusCode::OK, Json(json!({ "status": "ready" }))).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "not ready" }))).into_response()
    }
}

/// Liveness probe.
pub async fn liveness_check() -> Response {
    (StatusCode::OK, Json(json!({ "status": "alive" }))).into_response()
}

//! Admin handler mutating the property collection document.
//!
//! Performs the full download-modify-upload cycle against the platform
//! object store, then fires the redeploy hook. The collection document is
//! replaced wholesale on every write: there is no lock and no version
//! token, so concurrent mutations race and the last writer wins.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use propdesk_core::{
    Property, PropertyCollection, UpdateAction, PROPERTIES_BUCKET, PROPERTIES_OBJECT,
};
use propdesk_platform::PlatformError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApiError, server::AppState};

/// Mutation request body.
///
/// Both fields are checked after the collection is read; their absence is
/// a 400, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// One of `add`, `edit`, `delete`.
    #[serde(default)]
    pub action: Option<String>,
    /// The property record the action applies to.
    #[serde(default)]
    pub property: Option<Value>,
}

/// Mutates the property collection document.
///
/// Authenticates the caller against the platform auth service, authorizes
/// via the admin allowlist, applies one mutation to the stored collection,
/// and writes it back.
#[instrument(name = "update_properties", skip(state, headers, body), fields(body_bytes = body.len()))]
pub async fn update_properties(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match run_update(&state, &headers, &body).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => {
            debug!(status = e.status().as_u16(), error = %e, "update rejected");
            e.into_response()
        },
    }
}

async fn run_update(state: &AppState, headers: &HeaderMap, body: &Bytes) -> Result<(), ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::MissingToken)?;

    // The privileged handle only exists when the service key was
    // configured; without it no mutation can be served.
    let Some(storage) = state.storage.as_deref() else {
        warn!("mutation request while service key is unconfigured");
        return Err(ApiError::Misconfigured);
    };

    let user = state.auth.verify_token(token).await.map_err(|e| {
        warn!(error = %e, "token verification failed");
        ApiError::InvalidToken
    })?;

    let email = user.email.as_deref().map(str::to_lowercase).unwrap_or_default();
    if !state.admins.contains(&email) {
        warn!(user_id = %user.id, "mutation attempt by non-admin");
        return Err(ApiError::NotAdmin);
    }

    let raw = match storage.download(PROPERTIES_BUCKET, PROPERTIES_OBJECT).await {
        Ok(bytes) => bytes,
        // A document that was never written yet is an empty catalogue.
        Err(PlatformError::NotFound { .. }) => Bytes::new(),
        Err(e) => return Err(ApiError::StorageRead { message: e.to_string() }),
    };
    let mut collection =
        PropertyCollection::parse(&raw).map_err(|e| ApiError::unexpected(e.to_string()))?;

    let request: UpdateRequest =
        serde_json::from_slice(body).map_err(|e| ApiError::unexpected(e.to_string()))?;
    let (Some(action), Some(property)) = (request.action, request.property) else {
        return Err(ApiError::BadRequest);
    };
    let action = action.parse::<UpdateAction>().map_err(|_| ApiError::UnknownAction)?;

    let before = collection.len();
    collection.apply(action, Property::new(property));
    debug!(%action, before, after = collection.len(), "mutation applied");

    let document =
        collection.to_pretty_json().map_err(|e| ApiError::unexpected(e.to_string()))?;
    storage
        .upload(PROPERTIES_BUCKET, PROPERTIES_OBJECT, Bytes::from(document), "application/json")
        .await
        .map_err(|e| ApiError::StorageWrite { message: e.to_string() })?;

    if let Some(hook) = &state.hook {
        hook.fire();
    }

    info!(records = collection.len(), "collection document updated");
    Ok(())
}

/// Extracts the bearer token from the Authorization header.
///
/// Anything without the literal `"Bearer "` prefix counts as missing.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

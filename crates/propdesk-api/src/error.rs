//! API error taxonomy and response mapping.
//!
//! Every failure a request can hit maps 1:1 to a fixed HTTP status and a
//! fixed or interpolated message, serialized as `{"error": "..."}`. The
//! mapping is part of the endpoint's contract; clients match on these
//! strings.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error envelope returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error description
    pub error: String,
}

/// Request-level errors for the admin endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization: Bearer` header on the request.
    #[error("Unauthorized - missing token")]
    MissingToken,

    /// The auth service rejected the token or returned no user.
    #[error("Invalid token")]
    InvalidToken,

    /// The verified user is not on the admin allowlist.
    #[error("Forbidden - not an admin")]
    NotAdmin,

    /// The body is missing `action` or `property`.
    #[error("Bad request")]
    BadRequest,

    /// The action is not one of add, edit, delete.
    #[error("Unknown action")]
    UnknownAction,

    /// A required secret is absent from the process configuration.
    #[error("Server misconfiguration")]
    Misconfigured,

    /// The collection document could not be read (and was not merely
    /// missing).
    #[error("Failed to read properties.json: {message}")]
    StorageRead {
        /// Platform error description
        message: String,
    },

    /// The collection document could not be written back.
    #[error("Upload failed: {message}")]
    StorageWrite {
        /// Platform error description
        message: String,
    },

    /// Catch-all for anything else the handler hits.
    #[error("{message}")]
    Unexpected {
        /// Stringified failure
        message: String,
    },
}

impl ApiError {
    /// Creates a catch-all error from any displayable failure.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected { message: message.into() }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotAdmin => StatusCode::FORBIDDEN,
            Self::BadRequest | Self::UnknownAction => StatusCode::BAD_REQUEST,
            Self::Misconfigured
            | Self::StorageRead { .. }
            | Self::StorageWrite { .. }
            | Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_endpoint_contract() {
        assert_eq!(ApiError::MissingToken.to_string(), "Unauthorized - missing token");
        assert_eq!(ApiError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(ApiError::NotAdmin.to_string(), "Forbidden - not an admin");
        assert_eq!(ApiError::BadRequest.to_string(), "Bad request");
        assert_eq!(ApiError::UnknownAction.to_string(), "Unknown action");
        assert_eq!(ApiError::Misconfigured.to_string(), "Server misconfiguration");
        assert_eq!(
            ApiError::StorageRead { message: "boom".into() }.to_string(),
            "Failed to read properties.json: boom"
        );
        assert_eq!(
            ApiError::StorageWrite { message: "boom".into() }.to_string(),
            "Upload failed: boom"
        );
    }

    #[test]
    fn statuses_match_the_endpoint_contract() {
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotAdmin.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UnknownAction.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Misconfigured.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::unexpected("anything").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

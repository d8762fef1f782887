//! API error taxonomy with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Every handler failure maps onto one of these. Auth failures carry a
/// uniform message regardless of cause (no user enumeration), and NotFound
/// covers both true absence and wrong ownership (no existence leak).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input (400), with a field-level message.
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique key (409).
    #[error("{0}")]
    Conflict(String),

    /// Missing/invalid/expired credential (401).
    #[error("{0}")]
    Auth(String),

    /// Resource absent or not owned by the caller (404).
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected (500). The detail is logged, never returned.
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Uniform message for every credential failure.
pub const AUTH_FAILED: &str = "Invalid email or password";

/// Uniform message for every token failure.
pub const TOKEN_INVALID: &str = "Invalid or missing token";

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT_ERROR",
            Self::Auth(_) => "AUTH_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            error!("Internal error: {:#}", e);
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

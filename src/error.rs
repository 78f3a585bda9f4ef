//! Structured error types for API responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::fmt;

/// Entity kinds the validation layer can resolve.
///
/// Rendered lowercase in error bodies (`task 3 not found`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Goal,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Task => write!(f, "task"),
            EntityKind::Goal => write!(f, "goal"),
        }
    }
}

/// Errors surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required body field is missing, or the body failed to decode.
    #[error("invalid request payload")]
    InvalidPayload,

    /// Bulk assignment was requested without any task ids.
    #[error("no task_ids provided")]
    MissingTaskIds,

    /// A path identifier failed to parse as an integer.
    #[error("{kind} {raw} invalid")]
    InvalidIdentifier { kind: EntityKind, raw: String },

    /// No record exists for a well-formed identifier.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// Underlying datastore failure.
    #[error(transparent)]
    Database(anyhow::Error),
}

impl ApiError {
    pub fn invalid_identifier(kind: EntityKind, raw: &str) -> Self {
        Self::InvalidIdentifier {
            kind,
            raw: raw.to_string(),
        }
    }

    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// Status code and JSON body this error renders as.
    fn render(&self) -> (StatusCode, Value) {
        match self {
            ApiError::InvalidPayload => (
                StatusCode::BAD_REQUEST,
                json!({ "details": "Invalid data" }),
            ),
            ApiError::MissingTaskIds => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "No task_ids provided" }),
            ),
            ApiError::InvalidIdentifier { .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            ApiError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "message": self.to_string() }),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "internal server error" }),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(err) = &self {
            tracing::error!(error = %err, "request failed on datastore error");
        }
        let (status, body) = self.render();
        (status, Json(body)).into_response()
    }
}

// Typed errors raised inside db transactions travel through anyhow and are
// recovered here; anything else is a datastore failure.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::Database(err),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

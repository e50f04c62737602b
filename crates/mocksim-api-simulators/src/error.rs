//! Error types for the Simulator API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// Error type for the Simulator API.
#[derive(Debug, thiserror::Error)]
pub enum ApiSimulatorsError {
    /// Simulator not found (or owned by another user).
    #[error("Simulator not found")]
    NotFound,

    /// Another simulator of the same owner already uses this name.
    #[error("Simulator name already exists")]
    NameConflict,

    /// Validation error (invalid name, parameter key, range, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<crate::validation::ValidationError> for ApiSimulatorsError {
    fn from(err: crate::validation::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiSimulatorsError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiSimulatorsError::NotFound => {
                (StatusCode::NOT_FOUND, "Simulator not found".to_string())
            }
            ApiSimulatorsError::NameConflict => (
                StatusCode::CONFLICT,
                "A simulator with this name already exists".to_string(),
            ),
            ApiSimulatorsError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiSimulatorsError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token".to_string(),
            ),
            ApiSimulatorsError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiSimulatorsError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiSimulatorsError::NotFound.to_string(),
            "Simulator not found"
        );
        assert_eq!(
            ApiSimulatorsError::Validation("name: empty".to_string()).to_string(),
            "Validation error: name: empty"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiSimulatorsError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiSimulatorsError::NameConflict.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiSimulatorsError::Validation(String::new())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiSimulatorsError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}

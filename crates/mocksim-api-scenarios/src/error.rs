//! Error types for the failure-scenario API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mocksim_db::DbError;
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Error type for the failure-scenario API.
#[derive(Debug, thiserror::Error)]
pub enum ApiScenariosError {
    /// The named resource does not exist (or belongs to another user).
    #[error("{0} not found")]
    NotFound(String),

    /// The operation conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Validation error.
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

impl From<DbError> for ApiScenariosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => Self::NotFound(what),
            DbError::Conflict(msg) => Self::Conflict(msg),
            DbError::ValidationFailed(msg) => Self::Validation(msg),
            DbError::QueryFailed(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiScenariosError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiScenariosError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", capitalize(what)))
            }
            ApiScenariosError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiScenariosError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiScenariosError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token".to_string(),
            ),
            ApiScenariosError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiScenariosError::Database(e) => {
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

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

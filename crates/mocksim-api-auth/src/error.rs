//! Error types for the account API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mocksim_auth::AuthError;
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Error type for the account API.
#[derive(Debug, thiserror::Error)]
pub enum ApiAuthError {
    /// Login handle already registered.
    #[error("User id already exists")]
    HandleTaken,

    /// Unknown handle or wrong password. One message for both, so the
    /// endpoint does not reveal which handles exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication required or token rejected.
    #[error("Authentication required")]
    Unauthorized,

    /// User referenced by a valid token no longer resolves.
    #[error("User not found")]
    UserNotFound,

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiAuthError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::InvalidSignature | AuthError::InvalidToken(_) => {
                Self::Unauthorized
            }
            AuthError::HashingFailed(msg) => Self::Internal(format!("password hashing: {msg}")),
            AuthError::InvalidHashFormat => {
                Self::Internal("stored password hash is malformed".to_string())
            }
        }
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiAuthError::HandleTaken => (
                StatusCode::CONFLICT,
                "This user id is already registered".to_string(),
            ),
            ApiAuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid user id or password".to_string(),
            ),
            ApiAuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiAuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token".to_string(),
            ),
            ApiAuthError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            ApiAuthError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiAuthError::Database(e) => {
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
    fn test_status_codes() {
        assert_eq!(
            ApiAuthError::HandleTaken.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiAuthError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiAuthError::UserNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        let err: ApiAuthError = AuthError::TokenExpired.into();
        assert!(matches!(err, ApiAuthError::Unauthorized));
    }
}

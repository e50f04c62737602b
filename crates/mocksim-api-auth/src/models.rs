//! Request and response models for the account endpoints.

use chrono::{DateTime, Utc};
use mocksim_db::models::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for registration.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired login handle.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Plain-text password; hashed before storage.
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// Request body for a profile update. Omitted fields are unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A user as returned by the API. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_id: user.user_id,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Response body for a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// Response body for the handle availability probe.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckIdResponse {
    pub user_id: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_omits_hash() {
        let user = User {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            name: "Alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2id"));
    }
}

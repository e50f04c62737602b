//! Account service: registration, credential verification, profile updates.

use mocksim_auth::{encode_token, hash_password, verify_password, AuthClaims};
use mocksim_db::models::{CreateUser, User};
use mocksim_db::DbPool;
use uuid::Uuid;

use crate::error::ApiAuthError;
use crate::models::{
    CheckIdResponse, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};
use crate::router::TokenConfig;
use crate::validation::{validate_display_name, validate_handle, validate_password};

/// Account operations.
pub struct UserService {
    pool: DbPool,
    tokens: TokenConfig,
}

impl UserService {
    pub fn new(pool: DbPool, tokens: TokenConfig) -> Self {
        Self { pool, tokens }
    }

    /// Register a new account.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<UserResponse, ApiAuthError> {
        let handle = validate_handle(&request.user_id)?;
        let name = validate_display_name(&request.name)?;
        validate_password(&request.password)?;

        if User::handle_exists(self.pool.inner(), &handle).await? {
            return Err(ApiAuthError::HandleTaken);
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::create(
            self.pool.inner(),
            CreateUser {
                user_id: handle,
                name,
                password_hash,
            },
        )
        .await
        .map_err(|e| match &e {
            // A concurrent registration can slip past the pre-check; the
            // case-insensitive unique index reports it.
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiAuthError::HandleTaken,
            _ => ApiAuthError::Database(e),
        })?;

        tracing::info!(user_id = %user.user_id, "user registered");
        Ok(user.into())
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiAuthError> {
        let user = User::find_by_handle(self.pool.inner(), request.user_id.trim())
            .await?
            .ok_or(ApiAuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(ApiAuthError::InvalidCredentials);
        }

        let claims = AuthClaims::new(user.id, &user.user_id, self.tokens.ttl_secs);
        let access_token = encode_token(&claims, self.tokens.secret.as_bytes())?;

        tracing::info!(user_id = %user.user_id, "user logged in");
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            user: user.into(),
        })
    }

    /// The authenticated user's own record.
    pub async fn me(&self, id: Uuid) -> Result<UserResponse, ApiAuthError> {
        let user = User::find_by_id(self.pool.inner(), id)
            .await?
            .ok_or(ApiAuthError::UserNotFound)?;
        Ok(user.into())
    }

    /// Whether a handle is still available.
    pub async fn check_handle(&self, raw: &str) -> Result<CheckIdResponse, ApiAuthError> {
        let handle = validate_handle(raw)?;
        let taken = User::handle_exists(self.pool.inner(), &handle).await?;
        Ok(CheckIdResponse {
            user_id: handle,
            available: !taken,
        })
    }

    /// Update display name and/or password.
    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, ApiAuthError> {
        let name = match request.name {
            Some(raw) => Some(validate_display_name(&raw)?),
            None => None,
        };
        let password_hash = match request.password {
            Some(raw) => {
                validate_password(&raw)?;
                Some(hash_password(&raw)?)
            }
            None => None,
        };

        let user = User::update_profile(
            self.pool.inner(),
            id,
            name.as_deref(),
            password_hash.as_deref(),
        )
        .await?
        .ok_or(ApiAuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "profile updated");
        Ok(user.into())
    }
}

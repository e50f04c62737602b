//! HTTP handlers for the account endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use mocksim_auth::AuthClaims;
use uuid::Uuid;

use crate::error::ApiAuthError;
use crate::models::{
    CheckIdResponse, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};
use crate::router::AuthState;

fn owner_id(claims: &AuthClaims) -> Result<Uuid, ApiAuthError> {
    claims.user_uuid().ok_or(ApiAuthError::Unauthorized)
}

/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 409, description = "User id already registered", body = crate::error::ErrorBody),
    ),
    tag = "Auth"
)]
pub async fn register_handler(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiAuthError> {
    let created = state.users.register(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiAuthError> {
    Ok(Json(state.users.login(request).await?))
}

/// GET /api/auth/check-id/{user_id}
#[utoipa::path(
    get,
    path = "/api/auth/check-id/{user_id}",
    params(("user_id" = String, Path, description = "Login handle to probe")),
    responses(
        (status = 200, description = "Availability of the handle", body = CheckIdResponse),
        (status = 400, description = "Handle fails validation", body = crate::error::ErrorBody),
    ),
    tag = "Auth"
)]
pub async fn check_id_handler(
    State(state): State<AuthState>,
    Path(user_id): Path<String>,
) -> Result<Json<CheckIdResponse>, ApiAuthError> {
    Ok(Json(state.users.check_handle(&user_id).await?))
}

/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Auth",
    security(("bearerAuth" = []))
)]
pub async fn me_handler(
    State(state): State<AuthState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<UserResponse>, ApiAuthError> {
    let id = owner_id(&claims)?;
    Ok(Json(state.users.me(id).await?))
}

/// PUT /api/auth/me
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Auth",
    security(("bearerAuth" = []))
)]
pub async fn update_profile_handler(
    State(state): State<AuthState>,
    Extension(claims): Extension<AuthClaims>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiAuthError> {
    let id = owner_id(&claims)?;
    Ok(Json(state.users.update_profile(id, request).await?))
}

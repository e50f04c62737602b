//! Router configuration for the account API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use mocksim_db::DbPool;

use crate::handlers::{
    check_id_handler, login_handler, me_handler, register_handler, update_profile_handler,
};
use crate::services::UserService;

/// Token issuance settings shared across the service.
#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 signing secret.
    pub secret: Arc<String>,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
}

impl TokenConfig {
    pub fn new(secret: String, ttl_secs: i64) -> Self {
        Self {
            secret: Arc::new(secret),
            ttl_secs,
        }
    }
}

/// Application state for the account API.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserService>,
}

impl AuthState {
    pub fn new(pool: DbPool, tokens: TokenConfig) -> Self {
        Self {
            users: Arc::new(UserService::new(pool, tokens)),
        }
    }
}

/// Public account routes (no authentication).
///
/// - `POST /register`, `POST /login`, `GET /check-id/{user_id}`
pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/check-id/:user_id", get(check_id_handler))
        .with_state(state)
}

/// Profile routes; mount behind the auth middleware.
///
/// - `GET|PUT /me`
pub fn me_router(state: AuthState) -> Router {
    Router::new()
        .route("/me", get(me_handler).put(update_profile_handler))
        .with_state(state)
}

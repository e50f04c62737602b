//! Request middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use mocksim_auth::decode_token;
use serde_json::json;

/// Shared secret the auth middleware verifies tokens against.
#[derive(Clone)]
pub struct AuthSecret(pub Arc<String>);

/// Require a valid bearer token; on success the decoded [`AuthClaims`] are
/// inserted as a request extension for handlers to consume.
///
/// [`AuthClaims`]: mocksim_auth::AuthClaims
pub async fn require_auth(
    State(secret): State<AuthSecret>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token,
        None => return unauthorized("Missing bearer token"),
    };

    match decode_token(token, secret.0.as_bytes()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!("token rejected: {}", e);
            unauthorized("Invalid or expired token")
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

//! JWT claims carried by mocksim access tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer written into every claim set.
pub const ISSUER: &str = "mocksim";

/// Claims for a mocksim access token.
///
/// # Claims
///
/// - `sub`: internal user UUID (the owner identity the core operates on)
/// - `login`: the user's public login handle
/// - `iss` / `iat` / `exp`: standard RFC 7519 claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    /// Subject - the internal user id as a UUID string.
    pub sub: String,
    /// The user's public login handle.
    pub login: String,
    /// Issuer.
    pub iss: String,
    /// Issued at, as a Unix timestamp.
    pub iat: i64,
    /// Expiration time, as a Unix timestamp.
    pub exp: i64,
}

impl AuthClaims {
    /// Build claims for a freshly authenticated user.
    #[must_use]
    pub fn new(user_id: Uuid, login: &str, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            login: login.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        }
    }

    /// The subject parsed back into the internal user UUID.
    ///
    /// `None` means the token was not issued by this service.
    #[must_use]
    pub fn user_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

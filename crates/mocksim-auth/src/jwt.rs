//! JWT encoding and decoding with HS256.
//!
//! mocksim runs as a single service, so tokens are signed with a shared
//! secret from configuration rather than a rotated key set.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{AuthClaims, ISSUER};
use crate::error::AuthError;

/// Clock skew tolerance in seconds for `exp` validation.
const LEEWAY_SECS: u64 = 60;

/// Encode claims into a signed token string.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if encoding fails.
pub fn encode_token(claims: &AuthClaims, secret: &[u8]) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Decode and validate a token, returning its claims.
///
/// Validates the signature, expiry (with a small leeway for clock skew),
/// and the issuer.
///
/// # Errors
///
/// - `AuthError::TokenExpired` if the token's `exp` is in the past
/// - `AuthError::InvalidSignature` if the signature does not verify
/// - `AuthError::InvalidToken` for any other malformation
pub fn decode_token(token: &str, secret: &[u8]) -> Result<AuthClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = LEEWAY_SECS;
    validation.set_issuer(&[ISSUER]);

    decode::<AuthClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn test_encode_decode_roundtrip() {
        let claims = AuthClaims::new(Uuid::new_v4(), "testuser", 3600);
        let token = encode_token(&claims, SECRET).unwrap();
        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = AuthClaims::new(Uuid::new_v4(), "testuser", 3600);
        let token = encode_token(&claims, SECRET).unwrap();
        let err = decode_token(&token, b"other-secret").unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Expired well beyond the leeway window.
        let claims = AuthClaims::new(Uuid::new_v4(), "testuser", -7200);
        let token = encode_token(&claims, SECRET).unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = decode_token("not.a.jwt", SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let mut claims = AuthClaims::new(Uuid::new_v4(), "testuser", 3600);
        claims.iss = "someone-else".to_string();
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }
}

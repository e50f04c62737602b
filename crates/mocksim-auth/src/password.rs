//! Password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id instance with OWASP 2024 recommended parameters
/// (m=19456 KiB, t=2, p=1).
fn argon2() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(19456, 2, 1, None)
        .map_err(|e| AuthError::HashingFailed(format!("Invalid parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password, returning a PHC-formatted hash string.
///
/// # Errors
///
/// Returns `AuthError::HashingFailed` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed(format!("Hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(false)` for a wrong password; errors are reserved for
/// malformed hashes.
///
/// # Errors
///
/// Returns `AuthError::InvalidHashFormat` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidHashFormat)?;
    match argon2()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(AuthError::InvalidHashFormat),
    }
}

//! Error types for authentication operations.

use thiserror::Error;

/// Authentication error types.
///
/// Each variant maps to a specific failure mode in token or password
/// handling; the API layer decides which become 401s and which become 500s.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // JWT errors
    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Password errors
    /// Password hashing operation failed.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Password hash format is invalid.
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

//! JWT authentication and password hashing for mocksim.
//!
//! This crate provides:
//! - JWT HS256 encoding and decoding with the claims the API layer consumes
//! - Argon2id password hashing with OWASP-recommended parameters
//!
//! # Example
//!
//! ```rust
//! use mocksim_auth::{decode_token, encode_token, hash_password, verify_password, AuthClaims};
//! use uuid::Uuid;
//!
//! let secret = b"test-secret";
//! let claims = AuthClaims::new(Uuid::new_v4(), "rlawogur816", 3600);
//! let token = encode_token(&claims, secret).unwrap();
//! let decoded = decode_token(&token, secret).unwrap();
//! assert_eq!(decoded.login, "rlawogur816");
//!
//! let hash = hash_password("my-secure-password").unwrap();
//! assert!(verify_password("my-secure-password", &hash).unwrap());
//! ```

mod claims;
mod error;
mod jwt;
mod password;

// Re-export public API
pub use claims::AuthClaims;
pub use error::AuthError;
pub use jwt::{decode_token, encode_token};
pub use password::{hash_password, verify_password};

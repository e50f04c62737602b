//! Account API.
//!
//! Registration, login, handle availability, and profile management.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

pub use error::ApiAuthError;
pub use router::{auth_router, me_router, AuthState, TokenConfig};

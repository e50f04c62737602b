//! Failure-scenario API.
//!
//! CRUD over failure scenarios plus the apply / release pair, the
//! current-state preview for a simulator, and the stateless
//! failure-analytics endpoints.

pub mod analytics;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::ApiScenariosError;
pub use router::{analytics_router, scenarios_router, ScenariosState};

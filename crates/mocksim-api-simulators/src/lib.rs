//! Simulator management API.
//!
//! The Simulator Manager (validated CRUD + activation toggle) and the
//! Response Resolver behind the public data endpoint.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

pub use error::ApiSimulatorsError;
pub use router::{data_router, simulators_router, SimulatorsState};

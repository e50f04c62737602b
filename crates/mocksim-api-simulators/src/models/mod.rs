//! Request and response models.

mod requests;
mod responses;

pub use requests::{CreateSimulatorRequest, UpdateSimulatorRequest};
pub use responses::{InactiveResponse, SimulatorResponse};

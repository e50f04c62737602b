//! Simulator services.

mod resolver;
mod simulator_service;

pub use resolver::{Resolution, Resolver};
pub use simulator_service::SimulatorService;

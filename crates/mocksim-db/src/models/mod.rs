//! Entity models with their query methods.

mod failure_scenario;
mod simulator;
mod user;

pub use failure_scenario::{CreateScenario, FailureScenario, UpdateScenario};
pub use simulator::{CreateSimulator, Simulator, UpdateSimulator};
pub use user::{CreateUser, User};

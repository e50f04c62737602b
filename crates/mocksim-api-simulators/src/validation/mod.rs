//! Write-path validation and normalization.
//!
//! Everything a simulator record is allowed to contain is enforced here, so
//! the resolver can trust stored records unconditionally.

mod error;
mod name;
mod parameters;

pub use error::ValidationError;
pub use name::validate_simulator_name;
pub use parameters::normalize_parameters;

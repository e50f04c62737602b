//! HTTP handlers for the simulator endpoints.

mod data;
mod simulators;

pub use data::*;
pub use simulators::*;

use mocksim_auth::AuthClaims;
use uuid::Uuid;

use crate::error::ApiSimulatorsError;

/// Internal id of the authenticated owner.
pub(crate) fn owner_id(claims: &AuthClaims) -> Result<Uuid, ApiSimulatorsError> {
    claims.user_uuid().ok_or(ApiSimulatorsError::Unauthorized)
}

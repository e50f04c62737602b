//! The public data endpoint.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiSimulatorsError;
use crate::router::SimulatorsState;
use crate::services::Resolution;

/// GET /api/data/{user_id}/{simulator_name}
///
/// Unauthenticated. Serves the simulator's current payload, or the inactive
/// notice while the simulator is switched off.
#[utoipa::path(
    get,
    path = "/api/data/{user_id}/{simulator_name}",
    params(
        ("user_id" = String, Path, description = "Owner's login handle (case-insensitive)"),
        ("simulator_name" = String, Path, description = "Simulator name (exact)"),
    ),
    responses(
        (status = 200, description = "Resolved payload, or the inactive notice"),
        (status = 404, description = "Unknown user or simulator", body = crate::error::ErrorBody),
    ),
    tag = "Data"
)]
pub async fn get_data_handler(
    State(state): State<SimulatorsState>,
    Path((handle, simulator_name)): Path<(String, String)>,
) -> Result<Response, ApiSimulatorsError> {
    match state.resolver.resolve(&handle, &simulator_name).await? {
        Resolution::Inactive(notice) => Ok(Json(notice).into_response()),
        Resolution::Payload(payload) => Ok(Json(payload).into_response()),
    }
}

//! Owner-facing simulator CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use mocksim_auth::AuthClaims;
use uuid::Uuid;

use crate::error::ApiSimulatorsError;
use crate::models::{CreateSimulatorRequest, SimulatorResponse, UpdateSimulatorRequest};
use crate::router::SimulatorsState;

use super::owner_id;

/// POST /api/simulators
#[utoipa::path(
    post,
    path = "/api/simulators",
    request_body = CreateSimulatorRequest,
    responses(
        (status = 201, description = "Simulator created", body = SimulatorResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 409, description = "Name already in use", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn create_simulator_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
    Json(request): Json<CreateSimulatorRequest>,
) -> Result<(StatusCode, Json<SimulatorResponse>), ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    let created = state.simulators.create(owner, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/simulators
#[utoipa::path(
    get,
    path = "/api/simulators",
    responses(
        (status = 200, description = "Simulators of the authenticated user", body = [SimulatorResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn list_simulators_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<Vec<SimulatorResponse>>, ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.simulators.list(owner).await?))
}

/// GET /api/simulators/{id}
#[utoipa::path(
    get,
    path = "/api/simulators/{id}",
    params(("id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 200, description = "Simulator", body = SimulatorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn get_simulator_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SimulatorResponse>, ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.simulators.get(owner, id).await?))
}

/// PUT /api/simulators/{id}
#[utoipa::path(
    put,
    path = "/api/simulators/{id}",
    params(("id" = Uuid, Path, description = "Simulator id")),
    request_body = UpdateSimulatorRequest,
    responses(
        (status = 200, description = "Simulator updated", body = SimulatorResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
        (status = 409, description = "Name already in use", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn update_simulator_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSimulatorRequest>,
) -> Result<Json<SimulatorResponse>, ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.simulators.update(owner, id, request).await?))
}

/// PATCH /api/simulators/{id}/toggle
#[utoipa::path(
    patch,
    path = "/api/simulators/{id}/toggle",
    params(("id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 200, description = "Activation state flipped", body = SimulatorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn toggle_simulator_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<SimulatorResponse>, ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.simulators.toggle_active(owner, id).await?))
}

/// DELETE /api/simulators/{id}
#[utoipa::path(
    delete,
    path = "/api/simulators/{id}",
    params(("id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 204, description = "Simulator and bound scenarios deleted"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Simulators",
    security(("bearerAuth" = []))
)]
pub async fn delete_simulator_handler(
    State(state): State<SimulatorsState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiSimulatorsError> {
    let owner = owner_id(&claims)?;
    state.simulators.delete(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

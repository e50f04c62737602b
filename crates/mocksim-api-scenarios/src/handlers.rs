//! HTTP handlers for the failure-scenario endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use mocksim_auth::AuthClaims;
use uuid::Uuid;

use crate::error::ApiScenariosError;
use crate::models::{
    ApplyScenarioRequest, CreateScenarioRequest, CurrentStateResponse, ReleaseResponse,
    ScenarioResponse, UpdateScenarioRequest,
};
use crate::router::ScenariosState;

fn owner_id(claims: &AuthClaims) -> Result<Uuid, ApiScenariosError> {
    claims.user_uuid().ok_or(ApiScenariosError::Unauthorized)
}

/// POST /api/failure-scenarios
#[utoipa::path(
    post,
    path = "/api/failure-scenarios",
    request_body = CreateScenarioRequest,
    responses(
        (status = 201, description = "Scenario created", body = ScenarioResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Bound simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn create_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Json(request): Json<CreateScenarioRequest>,
) -> Result<(StatusCode, Json<ScenarioResponse>), ApiScenariosError> {
    let owner = owner_id(&claims)?;
    let created = state.scenarios.create(owner, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/failure-scenarios
#[utoipa::path(
    get,
    path = "/api/failure-scenarios",
    responses(
        (status = 200, description = "Scenarios of the authenticated user", body = [ScenarioResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn list_scenarios_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<Vec<ScenarioResponse>>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.scenarios.list(owner).await?))
}

/// GET /api/failure-scenarios/{id}
#[utoipa::path(
    get,
    path = "/api/failure-scenarios/{id}",
    params(("id" = Uuid, Path, description = "Scenario id")),
    responses(
        (status = 200, description = "Scenario", body = ScenarioResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Scenario not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn get_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScenarioResponse>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.scenarios.get(owner, id).await?))
}

/// PUT /api/failure-scenarios/{id}
#[utoipa::path(
    put,
    path = "/api/failure-scenarios/{id}",
    params(("id" = Uuid, Path, description = "Scenario id")),
    request_body = UpdateScenarioRequest,
    responses(
        (status = 200, description = "Scenario updated", body = ScenarioResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Scenario not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn update_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateScenarioRequest>,
) -> Result<Json<ScenarioResponse>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.scenarios.update(owner, id, request).await?))
}

/// DELETE /api/failure-scenarios/{id}
#[utoipa::path(
    delete,
    path = "/api/failure-scenarios/{id}",
    params(("id" = Uuid, Path, description = "Scenario id")),
    responses(
        (status = 204, description = "Scenario deleted"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Scenario not found", body = crate::error::ErrorBody),
        (status = 409, description = "Scenario is currently applied", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn delete_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    state.scenarios.delete(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/failure-scenarios/simulator/{id}
#[utoipa::path(
    get,
    path = "/api/failure-scenarios/simulator/{id}",
    params(("id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 200, description = "Scenarios bound to the simulator", body = [ScenarioResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn list_for_simulator_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(simulator_id): Path<Uuid>,
) -> Result<Json<Vec<ScenarioResponse>>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(
        state
            .scenarios
            .list_for_simulator(owner, simulator_id)
            .await?,
    ))
}

/// POST /api/failure-scenarios/apply/{simulator_id}
#[utoipa::path(
    post,
    path = "/api/failure-scenarios/apply/{simulator_id}",
    params(("simulator_id" = Uuid, Path, description = "Simulator id")),
    request_body = ApplyScenarioRequest,
    responses(
        (status = 200, description = "Scenario applied", body = ScenarioResponse),
        (status = 400, description = "Scenario is inactive", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator or scenario not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn apply_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(simulator_id): Path<Uuid>,
    Json(request): Json<ApplyScenarioRequest>,
) -> Result<Json<ScenarioResponse>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(
        state
            .scenarios
            .apply(owner, simulator_id, request.scenario_id)
            .await?,
    ))
}

/// POST /api/failure-scenarios/release/{simulator_id}
#[utoipa::path(
    post,
    path = "/api/failure-scenarios/release/{simulator_id}",
    params(("simulator_id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 200, description = "Applied scenario released (or nothing was applied)", body = ReleaseResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn release_scenario_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(simulator_id): Path<Uuid>,
) -> Result<Json<ReleaseResponse>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(state.scenarios.release(owner, simulator_id).await?))
}

/// GET /api/failure-scenarios/simulator/{id}/current
#[utoipa::path(
    get,
    path = "/api/failure-scenarios/simulator/{id}/current",
    params(("id" = Uuid, Path, description = "Simulator id")),
    responses(
        (status = 200, description = "Current served payload with scenario metadata", body = CurrentStateResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
        (status = 404, description = "Simulator not found", body = crate::error::ErrorBody),
    ),
    tag = "Failure Scenarios",
    security(("bearerAuth" = []))
)]
pub async fn current_state_handler(
    State(state): State<ScenariosState>,
    Extension(claims): Extension<AuthClaims>,
    Path(simulator_id): Path<Uuid>,
) -> Result<Json<CurrentStateResponse>, ApiScenariosError> {
    let owner = owner_id(&claims)?;
    Ok(Json(
        state.scenarios.current_state(owner, simulator_id).await?,
    ))
}

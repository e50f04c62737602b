//! Router configuration for the failure-scenario API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use mocksim_db::DbPool;

use crate::analytics::{
    failure_types_handler, generate_pattern_handler, noise_types_handler, predict_failure_handler,
    simulate_advanced_handler,
};
use crate::handlers::{
    apply_scenario_handler, create_scenario_handler, current_state_handler,
    delete_scenario_handler, get_scenario_handler, list_for_simulator_handler,
    list_scenarios_handler, release_scenario_handler, update_scenario_handler,
};
use crate::services::ScenarioService;

/// Application state for the failure-scenario API.
#[derive(Clone)]
pub struct ScenariosState {
    pub scenarios: Arc<ScenarioService>,
}

impl ScenariosState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            scenarios: Arc::new(ScenarioService::new(pool)),
        }
    }
}

/// Failure-scenario routes; mount behind the auth middleware.
///
/// - `GET|POST /`
/// - `GET|PUT|DELETE /{id}`
/// - `GET /simulator/{id}` and `GET /simulator/{id}/current`
/// - `POST /apply/{simulator_id}` and `POST /release/{simulator_id}`
pub fn scenarios_router(state: ScenariosState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_scenarios_handler).post(create_scenario_handler),
        )
        .route(
            "/:id",
            get(get_scenario_handler)
                .put(update_scenario_handler)
                .delete(delete_scenario_handler),
        )
        .route("/simulator/:id", get(list_for_simulator_handler))
        .route("/simulator/:id/current", get(current_state_handler))
        .route("/apply/:simulator_id", post(apply_scenario_handler))
        .route("/release/:simulator_id", post(release_scenario_handler))
        .with_state(state)
}

/// Failure-analytics routes; stateless, mount behind the auth middleware.
///
/// - `GET  /patterns/{pattern_type}`
/// - `POST /simulate-advanced` and `POST /predict-failure`
/// - `GET  /failure-types` and `GET /noise-types`
pub fn analytics_router() -> Router {
    Router::new()
        .route("/patterns/:pattern_type", get(generate_pattern_handler))
        .route("/simulate-advanced", post(simulate_advanced_handler))
        .route("/predict-failure", post(predict_failure_handler))
        .route("/failure-types", get(failure_types_handler))
        .route("/noise-types", get(noise_types_handler))
}

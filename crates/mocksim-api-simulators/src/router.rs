//! Router configuration for the simulator API.

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};
use mocksim_db::DbPool;

use crate::handlers::{
    create_simulator_handler, delete_simulator_handler, get_data_handler, get_simulator_handler,
    list_simulators_handler, toggle_simulator_handler, update_simulator_handler,
};
use crate::services::{Resolver, SimulatorService};

/// Application state for the simulator API.
#[derive(Clone)]
pub struct SimulatorsState {
    /// Owner-scoped simulator CRUD.
    pub simulators: Arc<SimulatorService>,
    /// Public data-path resolution.
    pub resolver: Arc<Resolver>,
}

impl SimulatorsState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            simulators: Arc::new(SimulatorService::new(pool.clone())),
            resolver: Arc::new(Resolver::new(pool)),
        }
    }
}

/// Owner-facing simulator routes; mount behind the auth middleware.
///
/// - `GET|POST /`
/// - `GET|PUT|DELETE /{id}`
/// - `PATCH /{id}/toggle`
pub fn simulators_router(state: SimulatorsState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_simulators_handler).post(create_simulator_handler),
        )
        .route(
            "/:id",
            get(get_simulator_handler)
                .put(update_simulator_handler)
                .delete(delete_simulator_handler),
        )
        .route("/:id/toggle", patch(toggle_simulator_handler))
        .with_state(state)
}

/// Public data route; mount without authentication.
///
/// - `GET /{user_id}/{simulator_name}`
pub fn data_router(state: SimulatorsState) -> Router {
    Router::new()
        .route("/:user_id/:simulator_name", get(get_data_handler))
        .with_state(state)
}

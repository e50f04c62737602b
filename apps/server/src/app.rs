//! Router composition.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use mocksim_api_auth::{auth_router, me_router, AuthState, TokenConfig};
use mocksim_api_scenarios::{analytics_router, scenarios_router, ScenariosState};
use mocksim_api_simulators::{data_router, simulators_router, SimulatorsState};
use mocksim_db::DbPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::health::health_handler;
use crate::middleware::{require_auth, AuthSecret};
use crate::openapi::docs_routes;

/// Build the full application router.
pub fn build_app(pool: DbPool, config: &AppConfig) -> Router {
    let secret = AuthSecret(Arc::new(config.jwt_secret.clone()));
    let tokens = TokenConfig::new(config.jwt_secret.clone(), config.token_ttl_secs);

    let auth_state = AuthState::new(pool.clone(), tokens);
    let simulators_state = SimulatorsState::new(pool.clone());
    let scenarios_state = ScenariosState::new(pool);

    let auth_layer = middleware::from_fn_with_state(secret, require_auth);

    // Public and protected account routes merge into one tree so the prefix
    // is nested exactly once.
    let account = auth_router(auth_state.clone())
        .merge(me_router(auth_state).layer(auth_layer.clone()));

    Router::new()
        .route("/health", get(health_handler))
        .merge(docs_routes())
        .nest("/api/auth", account)
        .nest(
            "/api/simulators",
            simulators_router(simulators_state.clone()).layer(auth_layer.clone()),
        )
        .nest(
            "/api/failure-scenarios",
            scenarios_router(scenarios_state).layer(auth_layer.clone()),
        )
        .nest(
            "/api/failure-analytics",
            analytics_router().layer(auth_layer),
        )
        .nest("/api/data", data_router(simulators_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

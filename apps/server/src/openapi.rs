//! `OpenAPI` document for the simulator API.

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::health::HealthResponse;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the mocksim server.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dynamic API Simulator",
        version = "0.1.0",
        description = "Define mock API endpoints with configurable payloads and failure scenarios"
    ),
    modifiers(&SecurityAddon),
    paths(
        crate::health::health_handler,
        mocksim_api_auth::handlers::register_handler,
        mocksim_api_auth::handlers::login_handler,
        mocksim_api_auth::handlers::check_id_handler,
        mocksim_api_auth::handlers::me_handler,
        mocksim_api_auth::handlers::update_profile_handler,
        mocksim_api_simulators::handlers::create_simulator_handler,
        mocksim_api_simulators::handlers::list_simulators_handler,
        mocksim_api_simulators::handlers::get_simulator_handler,
        mocksim_api_simulators::handlers::update_simulator_handler,
        mocksim_api_simulators::handlers::toggle_simulator_handler,
        mocksim_api_simulators::handlers::delete_simulator_handler,
        mocksim_api_simulators::handlers::get_data_handler,
        mocksim_api_scenarios::handlers::create_scenario_handler,
        mocksim_api_scenarios::handlers::list_scenarios_handler,
        mocksim_api_scenarios::handlers::get_scenario_handler,
        mocksim_api_scenarios::handlers::update_scenario_handler,
        mocksim_api_scenarios::handlers::delete_scenario_handler,
        mocksim_api_scenarios::handlers::list_for_simulator_handler,
        mocksim_api_scenarios::handlers::apply_scenario_handler,
        mocksim_api_scenarios::handlers::release_scenario_handler,
        mocksim_api_scenarios::handlers::current_state_handler,
        mocksim_api_scenarios::analytics::generate_pattern_handler,
        mocksim_api_scenarios::analytics::simulate_advanced_handler,
        mocksim_api_scenarios::analytics::predict_failure_handler,
        mocksim_api_scenarios::analytics::failure_types_handler,
        mocksim_api_scenarios::analytics::noise_types_handler,
    ),
    components(schemas(
        HealthResponse,
        mocksim_api_auth::error::ErrorBody,
        mocksim_api_auth::models::RegisterRequest,
        mocksim_api_auth::models::LoginRequest,
        mocksim_api_auth::models::UpdateProfileRequest,
        mocksim_api_auth::models::UserResponse,
        mocksim_api_auth::models::LoginResponse,
        mocksim_api_auth::models::CheckIdResponse,
        mocksim_api_simulators::models::CreateSimulatorRequest,
        mocksim_api_simulators::models::UpdateSimulatorRequest,
        mocksim_api_simulators::models::SimulatorResponse,
        mocksim_api_simulators::models::InactiveResponse,
        mocksim_api_scenarios::models::CreateScenarioRequest,
        mocksim_api_scenarios::models::UpdateScenarioRequest,
        mocksim_api_scenarios::models::ApplyScenarioRequest,
        mocksim_api_scenarios::models::ScenarioResponse,
        mocksim_api_scenarios::models::ReleaseResponse,
        mocksim_api_scenarios::models::AppliedScenarioInfo,
        mocksim_api_scenarios::models::CurrentStateResponse,
        mocksim_api_scenarios::analytics::PatternResponse,
        mocksim_api_scenarios::analytics::SimulateAdvancedRequest,
        mocksim_api_scenarios::analytics::SimulateAdvancedResponse,
        mocksim_api_scenarios::analytics::PredictFailureRequest,
        mocksim_api_scenarios::analytics::PredictFailureResponse,
        mocksim_api_scenarios::analytics::TrendInfo,
        mocksim_api_scenarios::analytics::KindDescriptor,
        mocksim_api_scenarios::analytics::FailureTypesResponse,
        mocksim_api_scenarios::analytics::NoiseTypesResponse,
        mocksim_core::ParamValue,
        mocksim_core::ParameterConfig,
        mocksim_core::ValueType,
        mocksim_core::pattern::PatternKind,
        mocksim_core::pattern::FailureKind,
        mocksim_core::pattern::NoiseKind,
        mocksim_core::pattern::NoiseConfig,
        mocksim_core::pattern::Clamp,
        mocksim_core::pattern::Disturbance,
        mocksim_core::pattern::AdvancedConfig,
        mocksim_core::pattern::SeriesStats,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "Registration, login, and profile"),
        (name = "Simulators", description = "Simulator management"),
        (name = "Failure Scenarios", description = "Failure-scenario management and activation"),
        (name = "Failure Analytics", description = "Pattern synthesis, disturbance simulation, and forecasting"),
        (name = "Data", description = "Public mock-data endpoint"),
    )
)]
pub struct ApiDoc;

/// Routes serving the generated document.
///
/// - `GET /docs/openapi.json`
pub fn docs_routes() -> Router {
    Router::new().route(
        "/docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

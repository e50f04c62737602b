//! Request and response models for the failure-scenario endpoints.

use chrono::{DateTime, Utc};
use mocksim_core::resolve::Payload;
use mocksim_core::FailureParameters;
use mocksim_db::models::FailureScenario;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiScenariosError;

/// Request body for creating a scenario.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateScenarioRequest {
    /// Free-text scenario name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Simulator to bind to; omit for a reusable scenario.
    pub simulator_id: Option<Uuid>,

    /// Override values keyed by parameter name.
    #[schema(value_type = Object)]
    pub failure_parameters: FailureParameters,

    /// Whether the scenario is selectable.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Request body for a partial scenario update. Omitted fields are unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateScenarioRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub failure_parameters: Option<FailureParameters>,
    pub is_active: Option<bool>,
}

/// Request body for applying a scenario to a simulator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyScenarioRequest {
    pub scenario_id: Uuid,
}

/// A failure scenario as returned to its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScenarioResponse {
    pub id: Uuid,
    pub simulator_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub failure_parameters: FailureParameters,
    pub is_active: bool,
    pub is_applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScenarioResponse {
    /// Build a response from a database record, parsing the stored overrides.
    pub fn from_record(record: FailureScenario) -> Result<Self, ApiScenariosError> {
        let failure_parameters = record.failure_parameters().map_err(|e| {
            ApiScenariosError::Internal(format!(
                "stored failure parameters are corrupt for scenario {}: {e}",
                record.id
            ))
        })?;
        Ok(Self {
            id: record.id,
            simulator_id: record.simulator_id,
            name: record.name,
            description: record.description,
            failure_parameters,
            is_active: record.is_active,
            is_applied: record.is_applied,
            applied_at: record.applied_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Body returned by the release endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReleaseResponse {
    /// Id of the scenario that was released, if one was applied.
    pub released_scenario_id: Option<Uuid>,
}

/// Metadata of the scenario applied to a simulator.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedScenarioInfo {
    pub id: Uuid,
    pub name: String,
    pub applied_at: Option<DateTime<Utc>>,
}

/// Preview of what the public data endpoint currently serves for a simulator.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentStateResponse {
    pub simulator_id: Uuid,
    pub simulator_name: String,
    pub is_active: bool,
    /// The payload a data request would receive right now. Randomized
    /// parameters are drawn fresh, like any other resolution.
    #[schema(value_type = Object)]
    pub payload: Payload,
    pub applied_scenario: Option<AppliedScenarioInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_active() {
        let req: CreateScenarioRequest = serde_json::from_str(
            r#"{"name": "fault", "failure_parameters": {"depth": 999}}"#,
        )
        .unwrap();
        assert!(req.is_active);
        assert!(req.simulator_id.is_none());
    }

    #[test]
    fn test_apply_request_shape() {
        let id = Uuid::new_v4();
        let req: ApplyScenarioRequest =
            serde_json::from_str(&format!(r#"{{"scenario_id": "{id}"}}"#)).unwrap();
        assert_eq!(req.scenario_id, id);
    }
}

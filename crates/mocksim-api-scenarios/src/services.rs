//! Failure-scenario service: validated CRUD plus the store-backed
//! apply / release pair and the current-state preview.

use mocksim_core::resolve::{build_payload, overlay};
use mocksim_core::FailureParameters;
use mocksim_db::models::{
    CreateScenario, FailureScenario, Simulator, UpdateScenario,
};
use mocksim_db::DbPool;
use uuid::Uuid;

use crate::error::ApiScenariosError;
use crate::models::{
    AppliedScenarioInfo, CreateScenarioRequest, CurrentStateResponse, ReleaseResponse,
    ScenarioResponse, UpdateScenarioRequest,
};

/// Maximum length of a scenario name.
const NAME_MAX_LEN: usize = 255;

/// Owner-scoped failure-scenario operations.
pub struct ScenarioService {
    pool: DbPool,
}

impl ScenarioService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a scenario, optionally bound to one of the owner's simulators.
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateScenarioRequest,
    ) -> Result<ScenarioResponse, ApiScenariosError> {
        let name = validate_name(&request.name)?;

        if let Some(simulator_id) = request.simulator_id {
            let exists = Simulator::find_owned(self.pool.inner(), owner, simulator_id)
                .await?
                .is_some();
            if !exists {
                return Err(ApiScenariosError::NotFound("simulator".to_string()));
            }
        }

        let record = FailureScenario::create(
            self.pool.inner(),
            CreateScenario {
                user_id: owner,
                simulator_id: request.simulator_id,
                name,
                description: request.description,
                failure_parameters: serialize(&request.failure_parameters)?,
                is_active: request.is_active,
            },
        )
        .await?;

        tracing::info!(scenario_id = %record.id, user_id = %owner, "failure scenario created");
        ScenarioResponse::from_record(record)
    }

    /// All scenarios of the owner, newest first.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<ScenarioResponse>, ApiScenariosError> {
        let records = FailureScenario::list_by_owner(self.pool.inner(), owner).await?;
        records
            .into_iter()
            .map(ScenarioResponse::from_record)
            .collect()
    }

    /// Scenarios bound to one simulator, newest first.
    pub async fn list_for_simulator(
        &self,
        owner: Uuid,
        simulator_id: Uuid,
    ) -> Result<Vec<ScenarioResponse>, ApiScenariosError> {
        let exists = Simulator::find_owned(self.pool.inner(), owner, simulator_id)
            .await?
            .is_some();
        if !exists {
            return Err(ApiScenariosError::NotFound("simulator".to_string()));
        }
        let records =
            FailureScenario::list_by_simulator(self.pool.inner(), owner, simulator_id).await?;
        records
            .into_iter()
            .map(ScenarioResponse::from_record)
            .collect()
    }

    /// One scenario by id.
    pub async fn get(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<ScenarioResponse, ApiScenariosError> {
        let record = FailureScenario::find_owned(self.pool.inner(), owner, id)
            .await?
            .ok_or_else(|| ApiScenariosError::NotFound("failure scenario".to_string()))?;
        ScenarioResponse::from_record(record)
    }

    /// Partial update.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        request: UpdateScenarioRequest,
    ) -> Result<ScenarioResponse, ApiScenariosError> {
        let name = match request.name {
            Some(raw) => Some(validate_name(&raw)?),
            None => None,
        };
        let failure_parameters = match &request.failure_parameters {
            Some(params) => Some(serialize(params)?),
            None => None,
        };

        let record = FailureScenario::update_fields(
            self.pool.inner(),
            owner,
            id,
            UpdateScenario {
                name,
                description: request.description,
                failure_parameters,
                is_active: request.is_active,
            },
        )
        .await?
        .ok_or_else(|| ApiScenariosError::NotFound("failure scenario".to_string()))?;

        ScenarioResponse::from_record(record)
    }

    /// Delete a scenario; rejected while it is applied.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiScenariosError> {
        FailureScenario::delete_checked(self.pool.inner(), owner, id).await?;
        tracing::info!(scenario_id = %id, user_id = %owner, "failure scenario deleted");
        Ok(())
    }

    /// Apply a scenario to a simulator, releasing whichever was applied.
    pub async fn apply(
        &self,
        owner: Uuid,
        simulator_id: Uuid,
        scenario_id: Uuid,
    ) -> Result<ScenarioResponse, ApiScenariosError> {
        let record =
            FailureScenario::apply_exclusive(self.pool.inner(), owner, simulator_id, scenario_id)
                .await?;
        tracing::info!(
            scenario_id = %record.id,
            simulator_id = %simulator_id,
            "failure scenario applied"
        );
        ScenarioResponse::from_record(record)
    }

    /// Release the applied scenario of a simulator. A no-op when nothing is
    /// applied.
    pub async fn release(
        &self,
        owner: Uuid,
        simulator_id: Uuid,
    ) -> Result<ReleaseResponse, ApiScenariosError> {
        let released =
            FailureScenario::release_exclusive(self.pool.inner(), owner, simulator_id).await?;
        if let Some(id) = released {
            tracing::info!(scenario_id = %id, simulator_id = %simulator_id, "failure scenario released");
        }
        Ok(ReleaseResponse {
            released_scenario_id: released,
        })
    }

    /// Preview the payload the public data endpoint would serve right now,
    /// with metadata of the applied scenario.
    pub async fn current_state(
        &self,
        owner: Uuid,
        simulator_id: Uuid,
    ) -> Result<CurrentStateResponse, ApiScenariosError> {
        let simulator = Simulator::find_owned(self.pool.inner(), owner, simulator_id)
            .await?
            .ok_or_else(|| ApiScenariosError::NotFound("simulator".to_string()))?;

        let parameters = simulator.parameters().map_err(|e| {
            ApiScenariosError::Internal(format!(
                "stored parameters are corrupt for simulator {}: {e}",
                simulator.id
            ))
        })?;
        let config = simulator.parameter_config().map_err(|e| {
            ApiScenariosError::Internal(format!(
                "stored parameter config is corrupt for simulator {}: {e}",
                simulator.id
            ))
        })?;

        let mut payload = build_payload(&parameters, &config, &mut rand::thread_rng());

        let applied =
            FailureScenario::find_applied_for_simulator(self.pool.inner(), simulator.id).await?;
        let applied_scenario = match applied {
            Some(scenario) => {
                let overrides: FailureParameters =
                    scenario.failure_parameters().map_err(|e| {
                        ApiScenariosError::Internal(format!(
                            "stored failure parameters are corrupt for scenario {}: {e}",
                            scenario.id
                        ))
                    })?;
                overlay(&mut payload, &overrides);
                Some(AppliedScenarioInfo {
                    id: scenario.id,
                    name: scenario.name,
                    applied_at: scenario.applied_at,
                })
            }
            None => None,
        };

        Ok(CurrentStateResponse {
            simulator_id: simulator.id,
            simulator_name: simulator.name,
            is_active: simulator.is_active,
            payload,
            applied_scenario,
        })
    }
}

fn validate_name(raw: &str) -> Result<String, ApiScenariosError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiScenariosError::Validation(
            "scenario name must not be empty".to_string(),
        ));
    }
    if name.len() > NAME_MAX_LEN {
        return Err(ApiScenariosError::Validation(format!(
            "scenario name must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn serialize(params: &FailureParameters) -> Result<String, ApiScenariosError> {
    serde_json::to_string(params)
        .map_err(|e| ApiScenariosError::Internal(format!("serializing failure parameters: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_name("  Sensor Fault  ").unwrap(), "Sensor Fault");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(256)).is_err());
    }
}

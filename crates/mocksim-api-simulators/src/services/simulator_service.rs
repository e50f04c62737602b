//! Simulator manager: validated CRUD plus the activation toggle.

use mocksim_core::{ParameterConfigMap, Parameters};
use mocksim_db::models::{CreateSimulator, Simulator, UpdateSimulator};
use mocksim_db::DbPool;
use uuid::Uuid;

use crate::error::ApiSimulatorsError;
use crate::models::{CreateSimulatorRequest, SimulatorResponse, UpdateSimulatorRequest};
use crate::validation::{normalize_parameters, validate_simulator_name};

/// Owner-scoped simulator operations. Every method takes the authenticated
/// owner's internal id; records of other users are indistinguishable from
/// absent ones.
pub struct SimulatorService {
    pool: DbPool,
}

impl SimulatorService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a simulator from a validated request.
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateSimulatorRequest,
    ) -> Result<SimulatorResponse, ApiSimulatorsError> {
        let name = validate_simulator_name(&request.name)?;
        let (parameters, parameter_config) =
            normalize_parameters(&request.parameters, &request.parameter_config)?;

        if Simulator::name_taken(self.pool.inner(), owner, &name, None).await? {
            return Err(ApiSimulatorsError::NameConflict);
        }

        let record = Simulator::create(
            self.pool.inner(),
            CreateSimulator {
                user_id: owner,
                name,
                parameters: serialize(&parameters)?,
                parameter_config: serialize(&parameter_config)?,
                is_active: request.is_active,
            },
        )
        .await
        .map_err(unique_violation_to_conflict)?;

        tracing::info!(simulator_id = %record.id, user_id = %owner, "simulator created");
        SimulatorResponse::from_record(record)
    }

    /// All simulators of the owner, newest first.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<SimulatorResponse>, ApiSimulatorsError> {
        let records = Simulator::list_by_owner(self.pool.inner(), owner).await?;
        records
            .into_iter()
            .map(SimulatorResponse::from_record)
            .collect()
    }

    /// One simulator by id.
    pub async fn get(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<SimulatorResponse, ApiSimulatorsError> {
        let record = Simulator::find_owned(self.pool.inner(), owner, id)
            .await?
            .ok_or(ApiSimulatorsError::NotFound)?;
        SimulatorResponse::from_record(record)
    }

    /// Partial update. When either half of the parameter pair is supplied the
    /// whole pair is re-normalized against the stored other half, so a patch
    /// can never leave the record violating the write-path invariants.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        request: UpdateSimulatorRequest,
    ) -> Result<SimulatorResponse, ApiSimulatorsError> {
        let existing = Simulator::find_owned(self.pool.inner(), owner, id)
            .await?
            .ok_or(ApiSimulatorsError::NotFound)?;

        let name = match request.name {
            Some(raw) => {
                let name = validate_simulator_name(&raw)?;
                if name != existing.name
                    && Simulator::name_taken(self.pool.inner(), owner, &name, Some(id)).await?
                {
                    return Err(ApiSimulatorsError::NameConflict);
                }
                Some(name)
            }
            None => None,
        };

        let (parameters, parameter_config) =
            if request.parameters.is_some() || request.parameter_config.is_some() {
                let params: Parameters = match request.parameters {
                    Some(p) => p,
                    None => parse_stored(&existing, existing.parameters())?,
                };
                let config: ParameterConfigMap = match request.parameter_config {
                    Some(c) => c,
                    None => parse_stored(&existing, existing.parameter_config())?,
                };
                let (p, c) = normalize_parameters(&params, &config)?;
                (Some(serialize(&p)?), Some(serialize(&c)?))
            } else {
                (None, None)
            };

        let record = Simulator::update_fields(
            self.pool.inner(),
            owner,
            id,
            UpdateSimulator {
                name,
                parameters,
                parameter_config,
                is_active: request.is_active,
            },
        )
        .await
        .map_err(unique_violation_to_conflict)?
        .ok_or(ApiSimulatorsError::NotFound)?;

        SimulatorResponse::from_record(record)
    }

    /// Flip the activation state and return the updated record.
    pub async fn toggle_active(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<SimulatorResponse, ApiSimulatorsError> {
        let record = Simulator::toggle_active(self.pool.inner(), owner, id)
            .await?
            .ok_or(ApiSimulatorsError::NotFound)?;
        tracing::info!(
            simulator_id = %record.id,
            is_active = record.is_active,
            "simulator toggled"
        );
        SimulatorResponse::from_record(record)
    }

    /// Delete a simulator and every scenario bound to it.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiSimulatorsError> {
        let deleted = Simulator::delete_cascade(self.pool.inner(), owner, id).await?;
        if !deleted {
            return Err(ApiSimulatorsError::NotFound);
        }
        tracing::info!(simulator_id = %id, user_id = %owner, "simulator deleted");
        Ok(())
    }
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<String, ApiSimulatorsError> {
    serde_json::to_string(value)
        .map_err(|e| ApiSimulatorsError::Internal(format!("serializing parameter map: {e}")))
}

fn parse_stored<T>(
    record: &Simulator,
    parsed: Result<T, serde_json::Error>,
) -> Result<T, ApiSimulatorsError> {
    parsed.map_err(|e| {
        ApiSimulatorsError::Internal(format!(
            "stored parameter data is corrupt for simulator {}: {e}",
            record.id
        ))
    })
}

/// A concurrent create can slip past the pre-check; the per-owner unique
/// index reports it as a unique violation.
fn unique_violation_to_conflict(err: sqlx::Error) -> ApiSimulatorsError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiSimulatorsError::NameConflict,
        _ => ApiSimulatorsError::Database(err),
    }
}

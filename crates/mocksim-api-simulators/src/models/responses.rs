//! Response bodies for the simulator endpoints.

use chrono::{DateTime, Utc};
use mocksim_core::{ParameterConfigMap, Parameters};
use mocksim_db::models::Simulator;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiSimulatorsError;

/// A simulator as returned to its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct SimulatorResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Object)]
    pub parameters: Parameters,
    #[schema(value_type = Object)]
    pub parameter_config: ParameterConfigMap,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulatorResponse {
    /// Build a response from a database record, parsing the stored JSON
    /// columns. A parse failure means the write path let a malformed record
    /// through, which is an internal error, not a client one.
    pub fn from_record(record: Simulator) -> Result<Self, ApiSimulatorsError> {
        let parameters = record.parameters().map_err(|e| {
            ApiSimulatorsError::Internal(format!(
                "stored parameters are corrupt for simulator {}: {e}",
                record.id
            ))
        })?;
        let parameter_config = record.parameter_config().map_err(|e| {
            ApiSimulatorsError::Internal(format!(
                "stored parameter config is corrupt for simulator {}: {e}",
                record.id
            ))
        })?;
        Ok(Self {
            id: record.id,
            name: record.name,
            parameters,
            parameter_config,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Body served by the public data endpoint while a simulator is switched off.
#[derive(Debug, Serialize, ToSchema)]
pub struct InactiveResponse {
    pub message: String,
    pub simulator_name: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl InactiveResponse {
    pub fn new(simulator_name: &str, user_handle: &str) -> Self {
        Self {
            message: "This simulator is currently inactive.".to_string(),
            simulator_name: simulator_name.to_string(),
            user_id: user_handle.to_string(),
            timestamp: Utc::now(),
        }
    }
}

//! The Response Resolver service behind the public data endpoint.
//!
//! Lookup and scenario overlay live here; the value assembly itself is the
//! pure engine in `mocksim_core::resolve`.

use mocksim_core::resolve::{build_payload, overlay, Payload};
use mocksim_db::models::{FailureScenario, Simulator};
use mocksim_db::DbPool;

use crate::error::ApiSimulatorsError;
use crate::models::InactiveResponse;

/// Outcome of resolving a public data request for a known simulator.
#[derive(Debug)]
pub enum Resolution {
    /// The simulator is switched off; serve the fixed notice body.
    Inactive(InactiveResponse),
    /// The simulator is active; serve the assembled payload.
    Payload(Payload),
}

/// Resolves `owner handle + simulator name` to a served body.
pub struct Resolver {
    pool: DbPool,
}

impl Resolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Resolve one public data request.
    ///
    /// The handle is matched case-insensitively, the simulator name exactly.
    /// Randomized parameters are drawn fresh on every call.
    pub async fn resolve(
        &self,
        handle: &str,
        simulator_name: &str,
    ) -> Result<Resolution, ApiSimulatorsError> {
        let simulator =
            Simulator::find_by_handle_and_name(self.pool.inner(), handle, simulator_name)
                .await?
                .ok_or(ApiSimulatorsError::NotFound)?;

        if !simulator.is_active {
            tracing::debug!(simulator_id = %simulator.id, "inactive simulator requested");
            return Ok(Resolution::Inactive(InactiveResponse::new(
                &simulator.name,
                handle,
            )));
        }

        let parameters = simulator.parameters().map_err(|e| {
            ApiSimulatorsError::Internal(format!(
                "stored parameters are corrupt for simulator {}: {e}",
                simulator.id
            ))
        })?;
        let config = simulator.parameter_config().map_err(|e| {
            ApiSimulatorsError::Internal(format!(
                "stored parameter config is corrupt for simulator {}: {e}",
                simulator.id
            ))
        })?;

        let mut payload = build_payload(&parameters, &config, &mut rand::thread_rng());

        if let Some(scenario) =
            FailureScenario::find_applied_for_simulator(self.pool.inner(), simulator.id).await?
        {
            let overrides = scenario.failure_parameters().map_err(|e| {
                ApiSimulatorsError::Internal(format!(
                    "stored failure parameters are corrupt for scenario {}: {e}",
                    scenario.id
                ))
            })?;
            overlay(&mut payload, &overrides);
            tracing::debug!(
                simulator_id = %simulator.id,
                scenario_id = %scenario.id,
                "applied scenario overlaid"
            );
        }

        Ok(Resolution::Payload(payload))
    }
}

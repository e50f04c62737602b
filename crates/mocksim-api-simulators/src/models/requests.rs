//! Request bodies for the simulator endpoints.

use mocksim_core::{ParameterConfigMap, Parameters};
use serde::Deserialize;
use utoipa::ToSchema;

fn default_true() -> bool {
    true
}

/// Request body for creating a simulator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSimulatorRequest {
    /// Simulator name; becomes part of the public data URL.
    pub name: String,

    /// Ordered map of parameter key to base value.
    #[schema(value_type = Object)]
    pub parameters: Parameters,

    /// Per-key generation policies; omitted keys default to fixed.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameter_config: ParameterConfigMap,

    /// Whether the data endpoint serves this simulator right away.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for a partial simulator update. Omitted fields are unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSimulatorRequest {
    pub name: Option<String>,

    #[schema(value_type = Object)]
    pub parameters: Option<Parameters>,

    #[schema(value_type = Object)]
    pub parameter_config: Option<ParameterConfigMap>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let req: CreateSimulatorRequest = serde_json::from_str(
            r#"{"name": "sensor", "parameters": {"depth": 25}}"#,
        )
        .unwrap();
        assert!(req.is_active);
        assert!(req.parameter_config.is_empty());
    }

    #[test]
    fn test_update_accepts_partial_bodies() {
        let req: UpdateSimulatorRequest =
            serde_json::from_str(r#"{"is_active": false}"#).unwrap();
        assert_eq!(req.is_active, Some(false));
        assert!(req.name.is_none());
        assert!(req.parameters.is_none());
    }
}

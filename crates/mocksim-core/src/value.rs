//! Parameter values and generation policies.
//!
//! A parameter value is tagged once, at write time: a JSON string stays a
//! string and a JSON number stays a number. The resolver never re-interprets
//! a stored value ("numeric-looking" strings are served back as strings).
//!
//! Maps are insertion-ordered so that a served payload lists parameters in
//! the order the owner defined them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Ordered map of parameter key to base value.
///
/// The value is `None` only for randomized parameters, where the stored value
/// is irrelevant and a fresh draw happens on every resolution.
pub type Parameters = IndexMap<String, Option<ParamValue>>;

/// Ordered map of parameter key to its generation policy.
pub type ParameterConfigMap = IndexMap<String, ParameterConfig>;

/// Map of parameter key to a failure-scenario override value.
pub type FailureParameters = IndexMap<String, ParamValue>;

/// A parameter value as submitted by the client.
///
/// Deserialization decides the kind from the JSON shape and the kind is kept
/// for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ParamValue {
    /// A string value, served back verbatim.
    Str(String),
    /// A numeric value; `serde_json::Number` preserves the exact numeric
    /// shape (integer vs. float) across storage round-trips.
    Num(#[schema(value_type = f64)] serde_json::Number),
}

impl ParamValue {
    /// Convert to a `serde_json::Value` for payload assembly.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Num(n) => Value::Number(n.clone()),
        }
    }
}

impl From<ParamValue> for Value {
    fn from(value: ParamValue) -> Self {
        value.to_json()
    }
}

/// Declared type of a randomized parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Draws are rounded to whole numbers.
    Integer,
    /// Draws are served as floating point.
    Float,
    /// Accepted for compatibility; random draws still produce floating point.
    String,
}

/// Generation policy for a single parameter.
///
/// When `is_random` is false the stored value is authoritative and `min`/`max`
/// are normalized to `None`. When `is_random` is true both bounds are required
/// and `min < max`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ParameterConfig {
    /// Whether a fresh value is drawn on every resolution.
    pub is_random: bool,
    /// Declared type of the drawn value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Inclusive lower bound of the draw range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound of the draw range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ParameterConfig {
    /// Policy for a fixed parameter: the stored value is served verbatim.
    #[must_use]
    pub fn fixed() -> Self {
        Self::default()
    }

    /// Policy for a randomized parameter.
    #[must_use]
    pub fn random(value_type: ValueType, min: f64, max: f64) -> Self {
        Self {
            is_random: true,
            value_type: Some(value_type),
            min: Some(min),
            max: Some(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_keeps_json_kind() {
        let v: ParamValue = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(v, ParamValue::Str("5".to_string()));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"5\"");

        let v: ParamValue = serde_json::from_str("5").unwrap();
        assert!(matches!(v, ParamValue::Num(_)));
        assert_eq!(serde_json::to_string(&v).unwrap(), "5");

        let v: ParamValue = serde_json::from_str("18.5").unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "18.5");
    }

    #[test]
    fn test_param_value_rejects_other_shapes() {
        assert!(serde_json::from_str::<ParamValue>("true").is_err());
        assert!(serde_json::from_str::<ParamValue>("[1]").is_err());
        assert!(serde_json::from_str::<ParamValue>("{\"a\":1}").is_err());
    }

    #[test]
    fn test_parameters_preserve_insertion_order() {
        let json = r#"{"depth_data": 25, "water_quality": 30, "tool": "test"}"#;
        let params: Parameters = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, ["depth_data", "water_quality", "tool"]);
    }

    #[test]
    fn test_parameter_config_serde() {
        let cfg: ParameterConfig =
            serde_json::from_str(r#"{"is_random": true, "type": "float", "min": 10.0, "max": 25.0}"#)
                .unwrap();
        assert_eq!(cfg, ParameterConfig::random(ValueType::Float, 10.0, 25.0));

        // Omitted fields default to a fixed parameter.
        let cfg: ParameterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ParameterConfig::fixed());

        // min/max are dropped from output when absent.
        let json = serde_json::to_string(&ParameterConfig::fixed()).unwrap();
        assert_eq!(json, r#"{"is_random":false}"#);
    }
}

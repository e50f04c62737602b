//! Parameter-set normalization.
//!
//! Takes the parameter map and per-key generation policies as submitted and
//! produces the canonical pair that gets stored. Every invariant the resolver
//! relies on is established here:
//!
//! - every surviving key has a policy entry (defaulted to fixed)
//! - a randomized key has finite bounds with `min < max`
//! - an integer-typed randomized key has bounds inside the `i64` range
//! - a fixed key has a stored value, and its bounds are cleared
//! - policy entries for keys not in the parameter map are dropped

use std::sync::LazyLock;

use mocksim_core::{ParameterConfig, ParameterConfigMap, Parameters, ValueType};
use regex::Regex;

use super::ValidationError;

// 2^63; the nearest f64 to both i64::MIN (exactly) and i64::MAX (one above).
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid regex"));

/// Validate and normalize a (parameters, parameter_config) pair.
///
/// Keys that are empty after trimming are silently dropped; an entirely empty
/// result is rejected since a simulator with no parameters serves nothing.
pub fn normalize_parameters(
    parameters: &Parameters,
    config: &ParameterConfigMap,
) -> Result<(Parameters, ParameterConfigMap), ValidationError> {
    let mut out_params = Parameters::with_capacity(parameters.len());
    let mut out_config = ParameterConfigMap::with_capacity(parameters.len());

    for (raw_key, stored) in parameters {
        let key = raw_key.trim();
        if key.is_empty() {
            continue;
        }
        if !KEY_RE.is_match(key) {
            return Err(ValidationError::new(
                format!("parameters.{key}"),
                "invalid_key",
                "parameter keys must start with a letter and contain only letters, digits, and underscores",
            ));
        }

        let mut cfg = config
            .get(raw_key)
            .or_else(|| config.get(key))
            .cloned()
            .unwrap_or_else(ParameterConfig::fixed);

        if cfg.is_random {
            let (Some(min), Some(max)) = (cfg.min, cfg.max) else {
                return Err(ValidationError::new(
                    format!("parameter_config.{key}"),
                    "missing_bounds",
                    "a random parameter requires both min and max",
                ));
            };
            if !min.is_finite() || !max.is_finite() {
                return Err(ValidationError::new(
                    format!("parameter_config.{key}"),
                    "non_finite_bounds",
                    "min and max must be finite numbers",
                ));
            }
            if min >= max {
                return Err(ValidationError::new(
                    format!("parameter_config.{key}"),
                    "invalid_range",
                    "min must be strictly less than max",
                ));
            }
            // Integer draws are cast to i64 at resolution time; bounds
            // outside that range would silently pin at the i64 limits.
            if cfg.value_type == Some(ValueType::Integer)
                && (min < -I64_BOUND || max > I64_BOUND)
            {
                return Err(ValidationError::new(
                    format!("parameter_config.{key}"),
                    "integer_bounds",
                    "integer bounds must fit in a signed 64-bit integer",
                ));
            }
        } else {
            if stored.is_none() {
                return Err(ValidationError::new(
                    format!("parameters.{key}"),
                    "missing_value",
                    "a fixed parameter requires a value",
                ));
            }
            // Bounds on a fixed parameter are leftovers from a previous
            // random policy; clear them.
            cfg.min = None;
            cfg.max = None;
        }

        out_params.insert(key.to_string(), stored.clone());
        out_config.insert(key.to_string(), cfg);
    }

    if out_params.is_empty() {
        return Err(ValidationError::new(
            "parameters",
            "empty",
            "a simulator requires at least one parameter",
        ));
    }

    Ok((out_params, out_config))
}

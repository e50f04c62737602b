//! The mock-response resolution engine.
//!
//! Pure functions that turn a simulator's stored parameter set into the JSON
//! payload to serve. Lookup, activation state, and the applied-scenario query
//! live in the API layer; everything here is side-effect free apart from the
//! caller-supplied random number generator.

use indexmap::IndexMap;
use rand::Rng;
use serde_json::Value;

use crate::value::{
    FailureParameters, ParamValue, ParameterConfig, ParameterConfigMap, Parameters, ValueType,
};

/// Assembled payload, in parameter insertion order.
pub type Payload = IndexMap<String, Value>;

/// Build the base payload for an active simulator.
///
/// Parameters are visited in insertion order. Fixed parameters contribute
/// their stored value verbatim; randomized parameters contribute a fresh
/// uniform draw from `[min, max]` on every call — nothing is cached between
/// resolutions.
pub fn build_payload<R: Rng + ?Sized>(
    parameters: &Parameters,
    config: &ParameterConfigMap,
    rng: &mut R,
) -> Payload {
    let mut payload = Payload::with_capacity(parameters.len());
    for (key, stored) in parameters {
        let value = match config.get(key) {
            Some(cfg) if cfg.is_random => draw(cfg, rng),
            _ => stored.as_ref().map_or(Value::Null, ParamValue::to_json),
        };
        payload.insert(key.clone(), value);
    }
    payload
}

/// Overlay an applied scenario's override values onto a payload.
///
/// Right-biased merge: every override replaces the corresponding entry, and
/// keys absent from the base payload are appended verbatim.
pub fn overlay(payload: &mut Payload, overrides: &FailureParameters) {
    for (key, value) in overrides {
        payload.insert(key.clone(), value.to_json());
    }
}

/// Draw a single value according to a random-generation policy.
///
/// A declared `integer` type rounds the draw to a whole number; any other
/// declared type is served as floating point. The write path guarantees
/// `min < max`, so the `Null` fallbacks are unreachable for stored records.
/// It also keeps integer bounds inside the `i64` range; the cast saturates
/// at the `i64` limits for any bounds that bypassed it.
fn draw<R: Rng + ?Sized>(cfg: &ParameterConfig, rng: &mut R) -> Value {
    let (Some(min), Some(max)) = (cfg.min, cfg.max) else {
        return Value::Null;
    };
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Value::Null;
    }
    let drawn = rng.gen_range(min..=max);
    match cfg.value_type {
        Some(ValueType::Integer) => Value::from(drawn.round() as i64),
        _ => serde_json::Number::from_f64(drawn).map_or(Value::Null, Value::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ParamValue;
    use rand::thread_rng;

    fn fixed_str(s: &str) -> Option<ParamValue> {
        Some(ParamValue::Str(s.to_string()))
    }

    fn fixed_num(n: i64) -> Option<ParamValue> {
        Some(ParamValue::Num(serde_json::Number::from(n)))
    }

    #[test]
    fn test_fixed_values_served_verbatim() {
        let mut params = Parameters::new();
        params.insert("x".to_string(), fixed_str("5"));
        params.insert("depth".to_string(), fixed_num(25));
        let mut config = ParameterConfigMap::new();
        config.insert("x".to_string(), ParameterConfig::fixed());
        config.insert("depth".to_string(), ParameterConfig::fixed());

        let mut rng = thread_rng();
        for _ in 0..10 {
            let payload = build_payload(&params, &config, &mut rng);
            assert_eq!(payload["x"], Value::String("5".to_string()));
            assert_eq!(payload["depth"], Value::from(25));
        }
    }

    #[test]
    fn test_payload_preserves_parameter_order() {
        let mut params = Parameters::new();
        params.insert("b".to_string(), fixed_num(1));
        params.insert("a".to_string(), fixed_num(2));
        params.insert("c".to_string(), fixed_num(3));
        let config = ParameterConfigMap::new();

        let payload = build_payload(&params, &config, &mut thread_rng());
        let keys: Vec<&String> = payload.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_random_float_draws_stay_in_range_and_cover_it() {
        let mut params = Parameters::new();
        params.insert("t".to_string(), None);
        let mut config = ParameterConfigMap::new();
        config.insert(
            "t".to_string(),
            ParameterConfig::random(ValueType::Float, 10.0, 25.0),
        );

        let mut rng = thread_rng();
        let mid = (10.0 + 25.0) / 2.0;
        let mut below = 0;
        let mut above = 0;
        for _ in 0..1000 {
            let payload = build_payload(&params, &config, &mut rng);
            let v = payload["t"].as_f64().expect("float draw");
            assert!((10.0..=25.0).contains(&v), "draw {v} out of range");
            if v < mid {
                below += 1;
            } else {
                above += 1;
            }
        }
        // Uniform draws hit both halves of the range; a systematic bias to
        // one end would leave one counter at zero.
        assert!(below > 0 && above > 0);
    }

    #[test]
    fn test_random_integer_draws_are_whole() {
        let mut params = Parameters::new();
        params.insert("n".to_string(), None);
        let mut config = ParameterConfigMap::new();
        config.insert(
            "n".to_string(),
            ParameterConfig::random(ValueType::Integer, 1.0, 6.0),
        );

        let mut rng = thread_rng();
        for _ in 0..1000 {
            let payload = build_payload(&params, &config, &mut rng);
            let v = payload["n"].as_i64().expect("integer draw");
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_each_resolution_is_independent() {
        let mut params = Parameters::new();
        params.insert("t".to_string(), None);
        let mut config = ParameterConfigMap::new();
        config.insert(
            "t".to_string(),
            ParameterConfig::random(ValueType::Float, 0.0, 1_000_000.0),
        );

        let mut rng = thread_rng();
        let a = build_payload(&params, &config, &mut rng);
        let b = build_payload(&params, &config, &mut rng);
        // Two fresh draws over a million-wide range colliding would indicate
        // a cached value.
        assert_ne!(a["t"], b["t"]);
    }

    #[test]
    fn test_overlay_is_right_biased_and_appends() {
        let mut payload = Payload::new();
        payload.insert("temperature".to_string(), Value::from(25));
        payload.insert("pressure".to_string(), Value::from(100));

        let mut overrides = FailureParameters::new();
        overrides.insert(
            "temperature".to_string(),
            ParamValue::Num(serde_json::Number::from(999)),
        );
        overrides.insert(
            "sensor_status".to_string(),
            ParamValue::Str("FAULT".to_string()),
        );

        overlay(&mut payload, &overrides);

        assert_eq!(payload["temperature"], Value::from(999));
        assert_eq!(payload["pressure"], Value::from(100));
        assert_eq!(payload["sensor_status"], Value::String("FAULT".to_string()));
        // Replaced keys keep their position; scenario-only keys go last.
        let keys: Vec<&String> = payload.keys().collect();
        assert_eq!(keys, ["temperature", "pressure", "sensor_status"]);
    }

    #[test]
    fn test_missing_bounds_yield_null() {
        // Defensive path: write-time validation rejects these configs.
        let cfg = ParameterConfig {
            is_random: true,
            value_type: Some(ValueType::Float),
            min: None,
            max: None,
        };
        assert_eq!(draw(&cfg, &mut thread_rng()), Value::Null);

        let degenerate = ParameterConfig::random(ValueType::Float, 1.0, 1.0);
        assert_eq!(draw(&degenerate, &mut thread_rng()), Value::Null);
    }
}

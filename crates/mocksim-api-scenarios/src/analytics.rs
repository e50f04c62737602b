//! Failure-analytics endpoints.
//!
//! Stateless companions to the scenario CRUD: synthetic pattern series,
//! time-stepped simulation of advanced disturbances, and a linear failure
//! forecast. Nothing here touches the database; the heavy lifting lives in
//! `mocksim_core::pattern` and these handlers validate, run, and shape the
//! response.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use indexmap::IndexMap;
use mocksim_auth::AuthClaims;
use mocksim_core::pattern::{
    apply_advanced, forecast, generate_pattern, AdvancedConfig, PatternKind, SeriesStats,
};
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiScenariosError;

const MAX_DURATION_SECS: u32 = 3_600;
const MAX_SAMPLE_RATE: u32 = 1_000;
/// Upper bound on samples per request, applied to both generation and
/// simulation so one call cannot produce an unbounded response body.
const MAX_SAMPLES: usize = 100_000;

fn default_base_value() -> f64 {
    100.0
}

fn default_duration() -> u32 {
    60
}

fn default_pattern_rate() -> u32 {
    10
}

fn default_sim_rate() -> u32 {
    1
}

fn default_parameter_name() -> String {
    "value".to_string()
}

fn default_future_steps() -> u32 {
    10
}

/// Query parameters for pattern generation.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatternQuery {
    /// Base value the pattern departs from.
    #[serde(default = "default_base_value")]
    pub base_value: f64,
    /// Simulated span in seconds (1..=3600).
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
    /// Samples per second (1..=1000).
    #[serde(default = "default_pattern_rate")]
    pub sample_rate: u32,
}

/// A generated failure-pattern series with its summary statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct PatternResponse {
    pub pattern_type: PatternKind,
    pub base_value: f64,
    pub duration_seconds: u32,
    pub sample_rate: u32,
    /// Sample times in seconds from the start of the window.
    pub time: Vec<f64>,
    pub values: Vec<f64>,
    pub statistics: SeriesStats,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SimulateAdvancedRequest {
    /// Base parameter values; non-numeric entries are echoed but not
    /// simulated.
    #[schema(value_type = Object)]
    pub original_parameters: IndexMap<String, Value>,
    #[serde(default)]
    pub advanced_config: AdvancedConfig,
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
    #[serde(default = "default_sim_rate")]
    pub sample_rate: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SimulateAdvancedResponse {
    #[schema(value_type = Object)]
    pub original_parameters: IndexMap<String, Value>,
    pub duration_seconds: u32,
    pub sample_rate: u32,
    /// Sample times in seconds from the start of the window.
    pub time: Vec<f64>,
    /// Disturbed value series per numeric parameter.
    #[schema(value_type = Object)]
    pub time_series: IndexMap<String, Vec<f64>>,
    #[schema(value_type = Object)]
    pub statistics: IndexMap<String, SeriesStats>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PredictFailureRequest {
    /// Observed values, oldest first. At least two points.
    pub history: Vec<f64>,
    /// A predicted value above this counts as a failure.
    pub threshold: f64,
    #[serde(default = "default_parameter_name")]
    pub parameter_name: String,
    /// How many future samples to extrapolate (1..=1000).
    #[serde(default = "default_future_steps")]
    pub future_steps: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrendInfo {
    pub slope: f64,
    pub intercept: f64,
    /// `"increasing"` or `"decreasing"`.
    pub direction: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictFailureResponse {
    pub parameter_name: String,
    pub history_length: usize,
    pub threshold: f64,
    pub future_steps: u32,
    /// Fraction of extrapolated samples above the threshold, in `[0, 1]`.
    pub failure_probability: f64,
    pub predicted_values: Vec<f64>,
    pub trend: TrendInfo,
    pub statistics: SeriesStats,
}

/// One entry of the failure-type / noise-type catalogs.
#[derive(Debug, Serialize, ToSchema)]
pub struct KindDescriptor {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    #[schema(value_type = Vec<String>)]
    pub parameters: &'static [&'static str],
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FailureTypesResponse {
    pub failure_types: Vec<KindDescriptor>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoiseTypesResponse {
    pub noise_types: Vec<KindDescriptor>,
}

fn check_window(duration_seconds: u32, sample_rate: u32) -> Result<usize, ApiScenariosError> {
    if duration_seconds == 0 || duration_seconds > MAX_DURATION_SECS {
        return Err(ApiScenariosError::Validation(format!(
            "duration_seconds must be between 1 and {MAX_DURATION_SECS}"
        )));
    }
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(ApiScenariosError::Validation(format!(
            "sample_rate must be between 1 and {MAX_SAMPLE_RATE}"
        )));
    }
    let samples = duration_seconds as usize * sample_rate as usize;
    if samples > MAX_SAMPLES {
        return Err(ApiScenariosError::Validation(format!(
            "duration_seconds * sample_rate must not exceed {MAX_SAMPLES} samples"
        )));
    }
    Ok(samples)
}

fn build_pattern(
    pattern_type: &str,
    query: PatternQuery,
) -> Result<PatternResponse, ApiScenariosError> {
    let kind = PatternKind::parse(pattern_type).ok_or_else(|| {
        ApiScenariosError::Validation(format!(
            "unknown pattern type '{pattern_type}'; expected one of \
             step, ramp, sine, noise, spike, degradation"
        ))
    })?;
    if !query.base_value.is_finite() {
        return Err(ApiScenariosError::Validation(
            "base_value must be a finite number".to_string(),
        ));
    }
    check_window(query.duration_seconds, query.sample_rate)?;

    let series = generate_pattern(
        query.base_value,
        kind,
        query.duration_seconds,
        query.sample_rate,
        &mut thread_rng(),
    );
    let statistics = SeriesStats::from_values(&series.values)
        .ok_or_else(|| ApiScenariosError::Internal("generated an empty series".to_string()))?;

    Ok(PatternResponse {
        pattern_type: kind,
        base_value: query.base_value,
        duration_seconds: query.duration_seconds,
        sample_rate: query.sample_rate,
        time: series.time,
        values: series.values,
        statistics,
    })
}

fn run_simulation(
    request: SimulateAdvancedRequest,
) -> Result<SimulateAdvancedResponse, ApiScenariosError> {
    let samples = check_window(request.duration_seconds, request.sample_rate)?;

    let numeric: IndexMap<String, f64> = request
        .original_parameters
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|n| (key.clone(), n)))
        .collect();
    if numeric.is_empty() {
        return Err(ApiScenariosError::Validation(
            "original_parameters must contain at least one numeric value".to_string(),
        ));
    }

    let mut rng = thread_rng();
    let mut time = Vec::with_capacity(samples);
    let mut time_series: IndexMap<String, Vec<f64>> = numeric
        .keys()
        .map(|key| (key.clone(), Vec::with_capacity(samples)))
        .collect();

    for i in 0..samples {
        let elapsed = i as f64 / f64::from(request.sample_rate);
        let step = apply_advanced(&numeric, &request.advanced_config, elapsed, &mut rng);
        time.push(elapsed);
        for (key, value) in step {
            if let Some(series) = time_series.get_mut(&key) {
                series.push(value);
            }
        }
    }

    let statistics = time_series
        .iter()
        .filter_map(|(key, values)| {
            SeriesStats::from_values(values).map(|stats| (key.clone(), stats))
        })
        .collect();

    Ok(SimulateAdvancedResponse {
        original_parameters: request.original_parameters,
        duration_seconds: request.duration_seconds,
        sample_rate: request.sample_rate,
        time,
        time_series,
        statistics,
    })
}

fn run_prediction(
    request: PredictFailureRequest,
) -> Result<PredictFailureResponse, ApiScenariosError> {
    if request.history.len() < 2 {
        return Err(ApiScenariosError::Validation(
            "history must contain at least two data points".to_string(),
        ));
    }
    if request.history.iter().any(|v| !v.is_finite()) || !request.threshold.is_finite() {
        return Err(ApiScenariosError::Validation(
            "history and threshold must be finite numbers".to_string(),
        ));
    }
    if request.future_steps == 0 || request.future_steps > MAX_SAMPLE_RATE {
        return Err(ApiScenariosError::Validation(format!(
            "future_steps must be between 1 and {MAX_SAMPLE_RATE}"
        )));
    }

    let trend = forecast(
        &request.history,
        request.threshold,
        request.future_steps as usize,
    )
    .ok_or_else(|| ApiScenariosError::Internal("trend fit failed".to_string()))?;
    let statistics = SeriesStats::from_values(&request.history)
        .ok_or_else(|| ApiScenariosError::Internal("history statistics failed".to_string()))?;

    Ok(PredictFailureResponse {
        parameter_name: request.parameter_name,
        history_length: request.history.len(),
        threshold: request.threshold,
        future_steps: request.future_steps,
        failure_probability: trend.exceedance,
        predicted_values: trend.predicted.clone(),
        trend: TrendInfo {
            slope: trend.slope,
            intercept: trend.intercept,
            direction: if trend.slope > 0.0 {
                "increasing".to_string()
            } else {
                "decreasing".to_string()
            },
        },
        statistics,
    })
}

fn failure_type_catalog() -> Vec<KindDescriptor> {
    vec![
        KindDescriptor {
            kind: "sudden",
            description: "Jumps straight to the failure value",
            parameters: &["failure_value"],
        },
        KindDescriptor {
            kind: "gradual",
            description: "Moves linearly from the base to the failure value",
            parameters: &["failure_value", "duration_seconds"],
        },
        KindDescriptor {
            kind: "intermittent",
            description: "Returns the failure value with a per-sample probability",
            parameters: &["failure_value", "failure_probability"],
        },
        KindDescriptor {
            kind: "cyclic",
            description: "Sine oscillation around the base value",
            parameters: &["period_seconds", "amplitude"],
        },
        KindDescriptor {
            kind: "random_walk",
            description: "Accumulating gaussian steps",
            parameters: &["step_size"],
        },
        KindDescriptor {
            kind: "drift",
            description: "Departs from the base value at a constant rate",
            parameters: &["drift_rate"],
        },
    ]
}

fn noise_type_catalog() -> Vec<KindDescriptor> {
    vec![
        KindDescriptor {
            kind: "gaussian",
            description: "Zero-mean normal noise",
            parameters: &["intensity"],
        },
        KindDescriptor {
            kind: "uniform",
            description: "Uniform noise over a symmetric range",
            parameters: &["intensity"],
        },
        KindDescriptor {
            kind: "exponential",
            description: "Exponentially distributed noise, always non-negative",
            parameters: &["intensity"],
        },
        KindDescriptor {
            kind: "poisson",
            description: "Replaces the value with a Poisson draw around it",
            parameters: &[],
        },
    ]
}

/// GET /api/failure-analytics/patterns/{pattern_type}
#[utoipa::path(
    get,
    path = "/api/failure-analytics/patterns/{pattern_type}",
    params(
        ("pattern_type" = String, Path, description = "step | ramp | sine | noise | spike | degradation"),
        PatternQuery,
    ),
    responses(
        (status = 200, description = "Generated pattern series", body = PatternResponse),
        (status = 400, description = "Unknown pattern type or invalid window", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Analytics",
    security(("bearerAuth" = []))
)]
pub async fn generate_pattern_handler(
    Extension(_claims): Extension<AuthClaims>,
    Path(pattern_type): Path<String>,
    Query(query): Query<PatternQuery>,
) -> Result<Json<PatternResponse>, ApiScenariosError> {
    Ok(Json(build_pattern(&pattern_type, query)?))
}

/// POST /api/failure-analytics/simulate-advanced
#[utoipa::path(
    post,
    path = "/api/failure-analytics/simulate-advanced",
    request_body = SimulateAdvancedRequest,
    responses(
        (status = 200, description = "Time-stepped disturbance simulation", body = SimulateAdvancedResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Analytics",
    security(("bearerAuth" = []))
)]
pub async fn simulate_advanced_handler(
    Extension(_claims): Extension<AuthClaims>,
    Json(request): Json<SimulateAdvancedRequest>,
) -> Result<Json<SimulateAdvancedResponse>, ApiScenariosError> {
    Ok(Json(run_simulation(request)?))
}

/// POST /api/failure-analytics/predict-failure
#[utoipa::path(
    post,
    path = "/api/failure-analytics/predict-failure",
    request_body = PredictFailureRequest,
    responses(
        (status = 200, description = "Linear failure forecast", body = PredictFailureResponse),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Analytics",
    security(("bearerAuth" = []))
)]
pub async fn predict_failure_handler(
    Extension(_claims): Extension<AuthClaims>,
    Json(request): Json<PredictFailureRequest>,
) -> Result<Json<PredictFailureResponse>, ApiScenariosError> {
    Ok(Json(run_prediction(request)?))
}

/// GET /api/failure-analytics/failure-types
#[utoipa::path(
    get,
    path = "/api/failure-analytics/failure-types",
    responses(
        (status = 200, description = "Available failure types", body = FailureTypesResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Analytics",
    security(("bearerAuth" = []))
)]
pub async fn failure_types_handler(
    Extension(_claims): Extension<AuthClaims>,
) -> Json<FailureTypesResponse> {
    Json(FailureTypesResponse {
        failure_types: failure_type_catalog(),
    })
}

/// GET /api/failure-analytics/noise-types
#[utoipa::path(
    get,
    path = "/api/failure-analytics/noise-types",
    responses(
        (status = 200, description = "Available noise types", body = NoiseTypesResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorBody),
    ),
    tag = "Failure Analytics",
    security(("bearerAuth" = []))
)]
pub async fn noise_types_handler(
    Extension(_claims): Extension<AuthClaims>,
) -> Json<NoiseTypesResponse> {
    Json(NoiseTypesResponse {
        noise_types: noise_type_catalog(),
    })
}

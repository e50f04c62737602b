//! Failure-pattern synthesis and time-series analytics.
//!
//! Pure building blocks behind the failure-analytics endpoints: synthetic
//! pattern series, per-parameter disturbances with optional noise and
//! clamping, summary statistics, and a linear trend forecast. Like the
//! resolution engine, everything here is side-effect free apart from the
//! caller-supplied random number generator.

use indexmap::IndexMap;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal, Poisson, StandardNormal};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shape of a synthetic failure-pattern series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Base value for the first half, doubled for the second.
    Step,
    /// Linear rise from the base value to twice the base value.
    Ramp,
    /// Sine oscillation around the base value (10 s period, ±50%).
    Sine,
    /// Base value plus gaussian noise (σ = 10% of the base value).
    Noise,
    /// Base value with ~5% of samples spiked to five times the base value.
    Spike,
    /// Exponential decay from the base value (rate 0.02/s).
    Degradation,
}

impl PatternKind {
    /// Parse a pattern name as it appears in a URL path segment.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "step" => Some(Self::Step),
            "ramp" => Some(Self::Ramp),
            "sine" => Some(Self::Sine),
            "noise" => Some(Self::Noise),
            "spike" => Some(Self::Spike),
            "degradation" => Some(Self::Degradation),
            _ => None,
        }
    }
}

/// A generated pattern: sample times (seconds) and the value at each time.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSeries {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

/// Generate a failure-pattern time series.
///
/// Produces `duration_seconds * sample_rate` samples with times spread
/// evenly over `[0, duration_seconds]` (endpoints included).
pub fn generate_pattern<R: Rng + ?Sized>(
    base: f64,
    kind: PatternKind,
    duration_seconds: u32,
    sample_rate: u32,
    rng: &mut R,
) -> PatternSeries {
    let n = duration_seconds as usize * sample_rate as usize;
    let duration = f64::from(duration_seconds);
    let time: Vec<f64> = if n <= 1 {
        vec![0.0; n]
    } else {
        (0..n)
            .map(|i| duration * i as f64 / (n - 1) as f64)
            .collect()
    };

    let values: Vec<f64> = match kind {
        PatternKind::Step => time
            .iter()
            .map(|&t| if t < duration / 2.0 { base } else { base * 2.0 })
            .collect(),
        PatternKind::Ramp => time.iter().map(|&t| base + base * t / duration).collect(),
        PatternKind::Sine => time
            .iter()
            .map(|&t| base * (1.0 + 0.5 * (std::f64::consts::TAU * t / 10.0).sin()))
            .collect(),
        PatternKind::Noise => {
            let sigma = (base * 0.1).abs();
            time.iter().map(|_| base + gaussian(sigma, rng)).collect()
        }
        PatternKind::Spike => {
            let mut values = vec![base; n];
            if n > 0 {
                for _ in 0..n / 20 {
                    let i = rng.gen_range(0..n);
                    values[i] = base * 5.0;
                }
            }
            values
        }
        PatternKind::Degradation => time.iter().map(|&t| base * (-0.02 * t).exp()).collect(),
    };

    PatternSeries { time, values }
}

/// Distribution used when injecting noise into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Zero-mean normal noise, σ = `intensity * |value|`.
    Gaussian,
    /// Uniform noise on `±intensity * |value|`.
    Uniform,
    /// Exponential (always non-negative) noise, mean `intensity * |value|`.
    Exponential,
    /// The value is replaced by a Poisson draw with λ = value.
    Poisson,
}

/// Noise to inject into a disturbed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NoiseConfig {
    #[serde(rename = "type")]
    pub kind: NoiseKind,
    /// Noise magnitude relative to the value. Defaults to 0.1.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

fn default_intensity() -> f64 {
    0.1
}

/// Inject noise into a value. A zero or non-finite noise scale leaves the
/// value untouched.
pub fn add_noise<R: Rng + ?Sized>(value: f64, noise: &NoiseConfig, rng: &mut R) -> f64 {
    let scale = (noise.intensity * value.abs()).abs();
    match noise.kind {
        NoiseKind::Gaussian => value + gaussian(scale, rng),
        NoiseKind::Uniform => {
            if scale > 0.0 && scale.is_finite() {
                value + rng.gen_range(-scale..=scale)
            } else {
                value
            }
        }
        NoiseKind::Exponential => {
            if scale > 0.0 && scale.is_finite() {
                Exp::new(1.0 / scale).map_or(value, |d| value + d.sample(rng))
            } else {
                value
            }
        }
        NoiseKind::Poisson => {
            if value > 0.0 && value.is_finite() {
                Poisson::new(value).map_or(value, |d| d.sample(rng))
            } else {
                value
            }
        }
    }
}

fn gaussian<R: Rng + ?Sized>(sigma: f64, rng: &mut R) -> f64 {
    if sigma > 0.0 && sigma.is_finite() {
        Normal::new(0.0, sigma).map_or(0.0, |d| d.sample(rng))
    } else {
        0.0
    }
}

/// How a disturbed parameter departs from its base value over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Jumps straight to the failure value.
    Sudden,
    /// Moves linearly from the base to the failure value over a duration.
    Gradual,
    /// Returns the failure value with a per-sample probability.
    Intermittent,
    /// Sine oscillation around the base value.
    Cyclic,
    /// Accumulating gaussian steps.
    RandomWalk,
    /// Departs from the base value at a constant relative rate.
    Drift,
}

/// Per-parameter disturbance: a failure shape plus optional noise and clamp.
///
/// Knobs not used by the selected `failure_type` are ignored; every knob has
/// a default so a bare `{"failure_type": "sudden"}` is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Disturbance {
    pub failure_type: Option<FailureKind>,
    /// Target value; defaults to ten times the base value.
    pub failure_value: Option<f64>,
    /// `gradual`: seconds to reach the failure value (default 60).
    pub duration_seconds: Option<f64>,
    /// `intermittent`: per-sample failure probability (default 0.3).
    pub failure_probability: Option<f64>,
    /// `cyclic`: oscillation period in seconds (default 60).
    pub period_seconds: Option<f64>,
    /// `cyclic`: oscillation amplitude (default half the base value).
    pub amplitude: Option<f64>,
    /// `random_walk`: step magnitude (default a tenth of the base value).
    pub step_size: Option<f64>,
    /// `drift`: relative departure per second (default 0.1).
    pub drift_rate: Option<f64>,
    pub noise: Option<NoiseConfig>,
    pub clamp: Option<Clamp>,
}

/// Inclusive bounds the disturbed value is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Clamp {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Disturb a single value: failure shape first, then noise, then clamp.
pub fn disturb<R: Rng + ?Sized>(
    value: f64,
    cfg: &Disturbance,
    elapsed_secs: f64,
    rng: &mut R,
) -> f64 {
    let mut out = match cfg.failure_type {
        Some(kind) => shift(value, kind, cfg, elapsed_secs, rng),
        None => value,
    };
    if let Some(noise) = &cfg.noise {
        out = add_noise(out, noise, rng);
    }
    if let Some(clamp) = &cfg.clamp {
        out = out.clamp(
            clamp.min.unwrap_or(f64::NEG_INFINITY),
            clamp.max.unwrap_or(f64::INFINITY),
        );
    }
    out
}

fn shift<R: Rng + ?Sized>(
    value: f64,
    kind: FailureKind,
    cfg: &Disturbance,
    elapsed: f64,
    rng: &mut R,
) -> f64 {
    let target = cfg.failure_value.unwrap_or(value * 10.0);
    match kind {
        FailureKind::Sudden => target,
        FailureKind::Gradual => {
            let duration = cfg.duration_seconds.unwrap_or(60.0);
            let progress = if duration > 0.0 {
                (elapsed / duration).min(1.0)
            } else {
                1.0
            };
            value + (target - value) * progress
        }
        FailureKind::Intermittent => {
            let p = cfg.failure_probability.unwrap_or(0.3);
            if rng.gen::<f64>() < p {
                target
            } else {
                value
            }
        }
        FailureKind::Cyclic => {
            let period = cfg.period_seconds.unwrap_or(60.0);
            if period <= 0.0 {
                return value;
            }
            let amplitude = cfg.amplitude.unwrap_or(value * 0.5);
            value + amplitude * (std::f64::consts::TAU * elapsed / period).sin()
        }
        FailureKind::RandomWalk => {
            let step = cfg.step_size.unwrap_or(value * 0.1);
            value + rng.sample::<f64, _>(StandardNormal) * step
        }
        FailureKind::Drift => {
            let rate = cfg.drift_rate.unwrap_or(0.1);
            value * (1.0 + rate * elapsed)
        }
    }
}

/// Advanced disturbance config: an optional all-or-nothing gate plus
/// per-parameter disturbances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AdvancedConfig {
    /// When set, the whole disturbance fires with this probability per call;
    /// a miss returns the base parameters untouched.
    pub probability: Option<f64>,
    #[schema(value_type = Object)]
    pub parameters: IndexMap<String, Disturbance>,
}

/// Apply an advanced disturbance config to a set of numeric parameters.
///
/// Keys in the config with no matching parameter are ignored; parameters
/// without a disturbance pass through unchanged.
pub fn apply_advanced<R: Rng + ?Sized>(
    params: &IndexMap<String, f64>,
    cfg: &AdvancedConfig,
    elapsed_secs: f64,
    rng: &mut R,
) -> IndexMap<String, f64> {
    if let Some(p) = cfg.probability {
        if rng.gen::<f64>() >= p {
            return params.clone();
        }
    }
    let mut out = params.clone();
    for (key, disturbance) in &cfg.parameters {
        if let Some(value) = out.get_mut(key) {
            *value = disturb(*value, disturbance, elapsed_secs, rng);
        }
    }
    out
}

/// Summary statistics of a value series (population moments).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeriesStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    pub variance: f64,
    pub skewness: f64,
    /// Excess kurtosis (0 for a normal distribution).
    pub kurtosis: f64,
}

impl SeriesStats {
    /// Compute statistics over a series. Returns `None` for an empty series.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let (skewness, kurtosis) = if std > 0.0 {
            let m3 = values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / n;
            let m4 = values.iter().map(|v| ((v - mean) / std).powi(4)).sum::<f64>() / n - 3.0;
            (m3, m4)
        } else {
            (0.0, 0.0)
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            mean,
            std,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: percentile(&sorted, 50.0),
            q25: percentile(&sorted, 25.0),
            q75: percentile(&sorted, 75.0),
            variance,
            skewness,
            kurtosis,
        })
    }
}

/// Linear-interpolated percentile over an ascending-sorted, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Least-squares linear extrapolation of a history series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendForecast {
    pub slope: f64,
    pub intercept: f64,
    /// Extrapolated values for the next `future_steps` sample indexes.
    pub predicted: Vec<f64>,
    /// Fraction of predicted values above the threshold, in `[0, 1]`.
    pub exceedance: f64,
}

/// Fit a line through `history` (x = sample index) and extrapolate
/// `future_steps` values, reporting how many exceed `threshold`.
///
/// Returns `None` when the history has fewer than two points or no future
/// steps are requested.
#[must_use]
pub fn forecast(history: &[f64], threshold: f64, future_steps: usize) -> Option<TrendForecast> {
    if history.len() < 2 || future_steps == 0 {
        return None;
    }
    let n = history.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = history.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, y) in history.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }
    // sxx > 0 whenever there are at least two points.
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let predicted: Vec<f64> = (history.len()..history.len() + future_steps)
        .map(|x| intercept + slope * x as f64)
        .collect();
    let over = predicted.iter().filter(|v| **v > threshold).count();
    let exceedance = over as f64 / future_steps as f64;

    Some(TrendForecast {
        slope,
        intercept,
        predicted,
        exceedance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_step_pattern_halves() {
        let series = generate_pattern(100.0, PatternKind::Step, 10, 2, &mut thread_rng());
        assert_eq!(series.values.len(), 20);
        assert_eq!(series.time[0], 0.0);
        assert_eq!(series.time[19], 10.0);
        assert_eq!(series.values[0], 100.0);
        assert_eq!(series.values[19], 200.0);
        assert!(series.values.iter().all(|v| *v == 100.0 || *v == 200.0));
    }

    #[test]
    fn test_ramp_and_degradation_endpoints() {
        let ramp = generate_pattern(50.0, PatternKind::Ramp, 20, 1, &mut thread_rng());
        assert_eq!(ramp.values[0], 50.0);
        assert!((ramp.values[19] - 100.0).abs() < 1e-9);

        let decay = generate_pattern(50.0, PatternKind::Degradation, 20, 1, &mut thread_rng());
        assert_eq!(decay.values[0], 50.0);
        let expected = 50.0 * (-0.02_f64 * 20.0).exp();
        assert!((decay.values[19] - expected).abs() < 1e-9);
        // Monotone decay.
        assert!(decay.values.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_sine_pattern_stays_within_band() {
        let series = generate_pattern(100.0, PatternKind::Sine, 30, 10, &mut thread_rng());
        assert!(series.values.iter().all(|v| (50.0..=150.0).contains(v)));
    }

    #[test]
    fn test_spike_pattern_values_limited_to_base_and_spike() {
        let series = generate_pattern(10.0, PatternKind::Spike, 60, 10, &mut thread_rng());
        assert!(series.values.iter().all(|v| *v == 10.0 || *v == 50.0));
        assert!(series.values.iter().any(|v| *v == 50.0));
    }

    #[test]
    fn test_noise_pattern_centers_on_base() {
        let series = generate_pattern(100.0, PatternKind::Noise, 100, 10, &mut thread_rng());
        assert!(series.values.iter().all(|v| v.is_finite()));
        let mean = series.values.iter().sum::<f64>() / series.values.len() as f64;
        // σ = 10 over 1000 samples: the mean sits well inside ±10% of base.
        assert!((90.0..=110.0).contains(&mean), "mean drifted to {mean}");
    }

    #[test]
    fn test_sudden_and_gradual_disturbance() {
        let mut rng = thread_rng();
        let sudden = Disturbance {
            failure_type: Some(FailureKind::Sudden),
            failure_value: Some(999.0),
            ..Default::default()
        };
        assert_eq!(disturb(25.0, &sudden, 0.0, &mut rng), 999.0);

        let gradual = Disturbance {
            failure_type: Some(FailureKind::Gradual),
            failure_value: Some(200.0),
            duration_seconds: Some(60.0),
            ..Default::default()
        };
        let halfway = disturb(100.0, &gradual, 30.0, &mut rng);
        assert!((halfway - 150.0).abs() < 1e-9);
        // Past the duration the value pins at the target.
        assert_eq!(disturb(100.0, &gradual, 300.0, &mut rng), 200.0);
    }

    #[test]
    fn test_cyclic_and_drift_disturbance() {
        let mut rng = thread_rng();
        let cyclic = Disturbance {
            failure_type: Some(FailureKind::Cyclic),
            period_seconds: Some(60.0),
            amplitude: Some(10.0),
            ..Default::default()
        };
        // A quarter period in, the sine peaks.
        let peak = disturb(100.0, &cyclic, 15.0, &mut rng);
        assert!((peak - 110.0).abs() < 1e-9);

        let drift = Disturbance {
            failure_type: Some(FailureKind::Drift),
            drift_rate: Some(0.1),
            ..Default::default()
        };
        let drifted = disturb(100.0, &drift, 10.0, &mut rng);
        assert!((drifted - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_intermittent_probability_extremes() {
        let mut rng = thread_rng();
        let mut cfg = Disturbance {
            failure_type: Some(FailureKind::Intermittent),
            failure_value: Some(0.0),
            failure_probability: Some(0.0),
            ..Default::default()
        };
        for _ in 0..100 {
            assert_eq!(disturb(50.0, &cfg, 0.0, &mut rng), 50.0);
        }
        cfg.failure_probability = Some(1.0);
        for _ in 0..100 {
            assert_eq!(disturb(50.0, &cfg, 0.0, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_clamp_bounds_disturbed_value() {
        let mut rng = thread_rng();
        let cfg = Disturbance {
            failure_type: Some(FailureKind::Sudden),
            failure_value: Some(999.0),
            clamp: Some(Clamp {
                min: None,
                max: Some(100.0),
            }),
            ..Default::default()
        };
        assert_eq!(disturb(25.0, &cfg, 0.0, &mut rng), 100.0);
    }

    #[test]
    fn test_noise_injection_bounds() {
        let mut rng = thread_rng();
        let uniform = NoiseConfig {
            kind: NoiseKind::Uniform,
            intensity: 0.1,
        };
        for _ in 0..1000 {
            let v = add_noise(100.0, &uniform, &mut rng);
            assert!((90.0..=110.0).contains(&v));
        }

        let exponential = NoiseConfig {
            kind: NoiseKind::Exponential,
            intensity: 0.1,
        };
        for _ in 0..1000 {
            assert!(add_noise(100.0, &exponential, &mut rng) >= 100.0);
        }

        // Zero intensity leaves the value untouched.
        let silent = NoiseConfig {
            kind: NoiseKind::Gaussian,
            intensity: 0.0,
        };
        assert_eq!(add_noise(100.0, &silent, &mut rng), 100.0);

        // Poisson over a non-positive value is a no-op.
        let poisson = NoiseConfig {
            kind: NoiseKind::Poisson,
            intensity: 0.1,
        };
        assert_eq!(add_noise(-5.0, &poisson, &mut rng), -5.0);
    }

    #[test]
    fn test_apply_advanced_respects_gate_and_untouched_keys() {
        let mut rng = thread_rng();
        let mut params = IndexMap::new();
        params.insert("temperature".to_string(), 25.0);
        params.insert("pressure".to_string(), 100.0);

        let mut cfg = AdvancedConfig::default();
        cfg.parameters.insert(
            "temperature".to_string(),
            Disturbance {
                failure_type: Some(FailureKind::Sudden),
                failure_value: Some(999.0),
                ..Default::default()
            },
        );

        let out = apply_advanced(&params, &cfg, 0.0, &mut rng);
        assert_eq!(out["temperature"], 999.0);
        assert_eq!(out["pressure"], 100.0);

        // A zero-probability gate suppresses the whole disturbance.
        cfg.probability = Some(0.0);
        let out = apply_advanced(&params, &cfg, 0.0, &mut rng);
        assert_eq!(out, params);
    }

    #[test]
    fn test_stats_on_known_series() {
        let stats = SeriesStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.variance, 1.25);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q25, 1.75);
        assert_eq!(stats.q75, 3.25);
        // Symmetric series has no skew.
        assert!(stats.skewness.abs() < 1e-12);

        assert!(SeriesStats::from_values(&[]).is_none());

        // A constant series has zero spread and defined higher moments.
        let flat = SeriesStats::from_values(&[7.0, 7.0, 7.0]).unwrap();
        assert_eq!(flat.std, 0.0);
        assert_eq!(flat.skewness, 0.0);
        assert_eq!(flat.kurtosis, 0.0);
    }

    #[test]
    fn test_forecast_extrapolates_linear_series() {
        let trend = forecast(&[1.0, 2.0, 3.0, 4.0, 5.0], 7.0, 4).unwrap();
        assert!((trend.slope - 1.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
        assert_eq!(trend.predicted.len(), 4);
        assert!((trend.predicted[0] - 6.0).abs() < 1e-9);
        assert!((trend.predicted[3] - 9.0).abs() < 1e-9);
        // 8 and 9 exceed the threshold of 7; 6 and 7 do not.
        assert!((trend.exceedance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_needs_two_points() {
        assert!(forecast(&[1.0], 10.0, 5).is_none());
        assert!(forecast(&[1.0, 2.0], 10.0, 0).is_none());
    }

    #[test]
    fn test_disturbance_config_serde_defaults() {
        let cfg: Disturbance = serde_json::from_str(
            r#"{"failure_type": "gradual", "failure_value": 200, "noise": {"type": "gaussian"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.failure_type, Some(FailureKind::Gradual));
        assert_eq!(cfg.failure_value, Some(200.0));
        assert_eq!(cfg.noise.unwrap().intensity, 0.1);
        assert!(cfg.duration_seconds.is_none());

        assert!(PatternKind::parse("sine").is_some());
        assert!(PatternKind::parse("sawtooth").is_none());
    }
}

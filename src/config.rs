//! Tunable constants for the correction, smoothing and statistics passes.

use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, Result};

/// Step delta above which one bucket is treated as a batched burst.
pub const GLITCH_STEP_THRESHOLD: i64 = 200;

/// Steps in a bucket needed for it to count as exercise.
pub const EXERCISE_STEP_THRESHOLD: i64 = 100;

/// Steps per minute needed for the final partial bucket to count as exercise.
pub const EXERCISE_PACE_THRESHOLD: f64 = 20.0;

/// Sampling interval of the tracker, in minutes.
pub const BUCKET_MINUTES: i64 = 5;

/// Kalman process noise (q).
pub const PROCESS_NOISE: f64 = 0.01;

/// Kalman measurement noise (r).
pub const MEASUREMENT_NOISE: f64 = 0.5;

/// Kalman error variance at seed time.
pub const INITIAL_ERROR: f64 = 1.0;

/// How the statistics engines read `step`/`distance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum LogSemantics {
    /// Each sample holds the running total since session start.
    #[default]
    Cumulative,
    /// Each sample holds the amount accrued in its own bucket.
    PerInterval,
}

/// Configuration for the activity pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct PipelineConfig {
    /// Correction kicks in when a step delta is strictly above this.
    /// Default: 200 steps
    pub glitch_step_threshold: i64,

    /// A full bucket is exercise when its step value reaches this.
    /// Default: 100 steps
    pub exercise_step_threshold: i64,

    /// The final bucket is exercise when its pace reaches this.
    /// Default: 20.0 steps/minute
    pub exercise_pace_threshold: f64,

    /// Minutes credited per full exercise bucket.
    /// Default: 5
    pub bucket_minutes: i64,

    /// Kalman process noise. Default: 0.01
    pub process_noise: f64,

    /// Kalman measurement noise. Default: 0.5
    pub measurement_noise: f64,

    /// Kalman error variance at seed time. Default: 1.0
    pub initial_error: f64,

    /// Default: Cumulative
    pub log_semantics: LogSemantics,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            glitch_step_threshold: GLITCH_STEP_THRESHOLD,
            exercise_step_threshold: EXERCISE_STEP_THRESHOLD,
            exercise_pace_threshold: EXERCISE_PACE_THRESHOLD,
            bucket_minutes: BUCKET_MINUTES,
            process_noise: PROCESS_NOISE,
            measurement_noise: MEASUREMENT_NOISE,
            initial_error: INITIAL_ERROR,
            log_semantics: LogSemantics::Cumulative,
        }
    }
}

impl PipelineConfig {
    /// Parse a host-supplied JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ActivityError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.glitch_step_threshold < 0 {
            return Err(ActivityError::invalid_config(
                "glitch_step_threshold",
                "must not be negative",
            ));
        }
        if self.exercise_step_threshold < 0 {
            return Err(ActivityError::invalid_config(
                "exercise_step_threshold",
                "must not be negative",
            ));
        }
        if !self.exercise_pace_threshold.is_finite() || self.exercise_pace_threshold < 0.0 {
            return Err(ActivityError::invalid_config(
                "exercise_pace_threshold",
                format!("expected a non-negative number, got {}", self.exercise_pace_threshold),
            ));
        }
        if self.bucket_minutes <= 0 {
            return Err(ActivityError::invalid_config("bucket_minutes", "must be positive"));
        }
        if !self.process_noise.is_finite() || self.process_noise < 0.0 {
            return Err(ActivityError::invalid_config(
                "process_noise",
                format!("expected a non-negative number, got {}", self.process_noise),
            ));
        }
        // r = 0 would turn every update into a copy of the measurement
        if !self.measurement_noise.is_finite() || self.measurement_noise <= 0.0 {
            return Err(ActivityError::invalid_config(
                "measurement_noise",
                format!("expected a positive number, got {}", self.measurement_noise),
            ));
        }
        if !self.initial_error.is_finite() || self.initial_error <= 0.0 {
            return Err(ActivityError::invalid_config(
                "initial_error",
                format!("expected a positive number, got {}", self.initial_error),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.glitch_step_threshold, 200);
        assert_eq!(config.bucket_minutes, 5);
        assert_eq!(config.log_semantics, LogSemantics::Cumulative);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = PipelineConfig {
            bucket_minutes: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ActivityError::InvalidConfig { ref field, .. }) if field == "bucket_minutes"
        ));

        let config = PipelineConfig {
            measurement_noise: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            process_noise: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{"glitchStepThreshold": 300, "logSemantics": "perInterval"}"#;
        let config = PipelineConfig::from_json(json).unwrap();
        assert_eq!(config.glitch_step_threshold, 300);
        assert_eq!(config.log_semantics, LogSemantics::PerInterval);
        assert_eq!(config.exercise_step_threshold, EXERCISE_STEP_THRESHOLD);
    }

    #[test]
    fn test_from_json_defaults_to_cumulative() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.log_semantics, LogSemantics::Cumulative);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(PipelineConfig::from_json("not json").is_err());
        assert!(PipelineConfig::from_json(r#"{"bucketMinutes": -5}"#).is_err());
    }
}

//! Scalar Kalman smoothing for step and distance series.
//!
//! Step and distance each get their own one-dimensional filter sharing the
//! same process/measurement noise. Idle `(0, 0)` samples are buckets with
//! no activity, not bad readings: they pass through untouched and never feed
//! the filter, so warm-up placeholders cannot drag the estimate toward zero.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ActivityLog, PipelineConfig};

/// One-dimensional Kalman filter with constant process and measurement noise.
///
/// # Example
/// ```
/// use climb_activity::ScalarKalman;
///
/// let mut filter = ScalarKalman::new(100.0, 1.0, 0.01, 0.5);
/// let smoothed = filter.update(130.0);
/// assert!(smoothed > 100.0 && smoothed < 130.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarKalman {
    /// Current state estimate
    pub estimate: f64,
    /// Error variance of the estimate
    pub error: f64,
    /// Process noise (q)
    pub process_noise: f64,
    /// Measurement noise (r)
    pub measurement_noise: f64,
}

impl ScalarKalman {
    pub fn new(estimate: f64, error: f64, process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            estimate,
            error,
            process_noise,
            measurement_noise,
        }
    }

    /// Seed a filter from the pipeline's noise settings.
    pub fn seeded(estimate: f64, config: &PipelineConfig) -> Self {
        Self::new(
            estimate,
            config.initial_error,
            config.process_noise,
            config.measurement_noise,
        )
    }

    /// Predict, then blend in `measurement`. Returns the new estimate.
    pub fn update(&mut self, measurement: f64) -> f64 {
        self.error += self.process_noise;
        let gain = self.error / (self.error + self.measurement_noise);
        self.estimate += gain * (measurement - self.estimate);
        self.error *= 1.0 - gain;
        self.estimate
    }
}

/// Smooth the step and distance signals of a log sequence.
///
/// Both filters are seeded from the first sample with any activity. A
/// sequence with no such sample is returned unchanged. Filtered values are
/// truncated toward zero; `id` and `time` are preserved.
pub fn smooth_logs(logs: &[ActivityLog], config: &PipelineConfig) -> Vec<ActivityLog> {
    let seed_index = match logs.iter().position(|l| !l.is_idle()) {
        Some(idx) => idx,
        None => return logs.to_vec(),
    };

    let seed = &logs[seed_index];
    let mut step_filter = ScalarKalman::seeded(seed.step as f64, config);
    let mut distance_filter = ScalarKalman::seeded(seed.distance as f64, config);

    debug!(
        "[Smoothing] Seeded at sample {} of {} (step={}, distance={})",
        seed_index,
        logs.len(),
        seed.step,
        seed.distance
    );

    logs.iter()
        .map(|log| {
            if log.is_idle() {
                return log.clone();
            }
            let step = step_filter.update(log.step as f64);
            let distance = distance_filter.update(log.distance as f64);
            log.with_values(step.trunc() as i64, distance.trunc() as i64)
        })
        .collect()
}

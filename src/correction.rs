//! Burst correction for batched pedometer deliveries.
//!
//! The motion coprocessor sometimes delivers several minutes of steps at once,
//! so one 5-minute bucket shows an implausible jump while its predecessor looks
//! too quiet. When the step delta between two neighbours exceeds the glitch
//! threshold, half of the step delta and half of the distance delta are moved
//! from the later sample to the earlier one.
//!
//! ## Example
//! ```rust
//! use climb_activity::{correct_logs, ActivityLog, PipelineConfig};
//!
//! let logs = vec![
//!     ActivityLog::session_start(0),
//!     ActivityLog::new(300, 150, 120),
//!     ActivityLog::new(600, 400, 250),
//! ];
//! let corrected = correct_logs(&logs, &PipelineConfig::default());
//! assert_eq!(corrected[1].step, 275);
//! assert_eq!(corrected[2].step, 275);
//! ```

use log::debug;

use crate::{ActivityLog, PipelineConfig};

/// Redistribute step/distance bursts between adjacent samples.
///
/// Pairs are visited left to right on a working copy, so a sample that
/// received half of a burst is compared in its corrected state against the
/// next one. Every redistribution conserves the pair's step and distance sums.
/// `id`, `time`, ordering and length are preserved.
///
/// Deltas are halved with truncating division. With non-negative, ascending
/// input the corrected values stay non-negative; decreasing distances inside
/// a step burst can move the earlier sample below its original value.
pub fn correct_logs(logs: &[ActivityLog], config: &PipelineConfig) -> Vec<ActivityLog> {
    let mut corrected = logs.to_vec();
    if corrected.len() < 2 {
        return corrected;
    }

    let mut glitches = 0usize;
    for i in 1..corrected.len() {
        let diff_step = corrected[i].step - corrected[i - 1].step;
        if diff_step <= config.glitch_step_threshold {
            continue;
        }
        let diff_distance = corrected[i].distance - corrected[i - 1].distance;
        let half_step = diff_step / 2;
        let half_distance = diff_distance / 2;

        corrected[i - 1].step += half_step;
        corrected[i - 1].distance += half_distance;
        corrected[i].step -= half_step;
        corrected[i].distance -= half_distance;
        glitches += 1;
    }

    if glitches > 0 {
        debug!(
            "[Correction] Redistributed {} bursts across {} samples",
            glitches,
            corrected.len()
        );
    }

    corrected
}

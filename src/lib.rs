//! # Climb Activity
//!
//! Step and distance post-processing for hiking activity logs.
//!
//! This library provides:
//! - Glitch correction for batched pedometer deliveries
//! - Scalar Kalman smoothing of the step and distance signals
//! - Per-climb statistics (exercise/rest segmentation)
//! - Averages across a climb history
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel aggregation with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use climb_activity::{ActivityLog, ActivityPipeline};
//!
//! let t0 = 1_700_000_000;
//! let raw = vec![
//!     ActivityLog::session_start(t0),
//!     ActivityLog::new(t0 + 300, 150, 120),
//!     ActivityLog::new(t0 + 600, 400, 250),
//! ];
//!
//! let pipeline = ActivityPipeline::default();
//! let cleaned = pipeline.clean(&raw);
//! let stat = pipeline.stat(&cleaned);
//! assert_eq!(cleaned.len(), 3);
//! assert_eq!(stat.total_time_minutes, 10);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Unified error handling
pub mod error;
pub use error::{ActivityError, Result};

// Tunable thresholds and filter noise
pub mod config;
pub use config::{LogSemantics, PipelineConfig};

// Burst redistribution between neighbouring buckets
pub mod correction;
pub use correction::correct_logs;

// Kalman smoothing of step/distance
pub mod smoothing;
pub use smoothing::{smooth_logs, ScalarKalman};

// Single-climb statistics
pub mod stats;
pub use stats::activity_stat;

// Statistics across a climb history
pub mod aggregate;
pub use aggregate::average_activity_stat;

// Correction + smoothing wired together
pub mod pipeline;
pub use pipeline::{clean_logs, ActivityPipeline};

// Sensor collaborator boundary
pub mod tracker;
pub use tracker::{collect_clean_logs, ActivityTracker, ReplayTracker};

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("ClimbActivityRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// One pedometer sample of a tracking session.
///
/// `step` and `distance` are whatever the tracker delivered for this bucket.
/// Values are signed so that malformed sequences (decreasing counters,
/// out-of-order samples) produce plain arithmetic instead of overflow.
///
/// # Example
/// ```
/// use climb_activity::ActivityLog;
/// let start = ActivityLog::session_start(1_700_000_000);
/// assert!(start.is_idle());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ActivityLog {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Unix timestamp (seconds since epoch)
    pub time: i64,
    /// Step count
    pub step: i64,
    /// Distance in meters
    pub distance: i64,
}

impl ActivityLog {
    /// Create a sample with a freshly generated id.
    pub fn new(time: i64, step: i64, distance: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time,
            step,
            distance,
        }
    }

    /// Create a sample with a known id (e.g. loaded from storage).
    pub fn with_id(id: impl Into<String>, time: i64, step: i64, distance: i64) -> Self {
        Self {
            id: id.into(),
            time,
            step,
            distance,
        }
    }

    /// The zero-valued placeholder recorded when tracking starts.
    pub fn session_start(time: i64) -> Self {
        Self::new(time, 0, 0)
    }

    /// True when both step and distance are exactly zero.
    pub fn is_idle(&self) -> bool {
        self.step == 0 && self.distance == 0
    }

    /// Copy of this sample with new values, keeping `id` and `time`.
    pub fn with_values(&self, step: i64, distance: i64) -> Self {
        Self {
            id: self.id.clone(),
            time: self.time,
            step,
            distance,
        }
    }
}

/// Whole minutes between two timestamps, truncated toward zero.
pub(crate) fn whole_minutes(from: i64, to: i64) -> i64 {
    (to - from) / 60
}

/// Convert a cumulative series into per-interval amounts.
///
/// The first sample keeps its own value (normally zero); every later sample
/// becomes the difference from its predecessor.
pub fn interval_deltas(logs: &[ActivityLog]) -> Vec<ActivityLog> {
    let mut deltas = Vec::with_capacity(logs.len());
    let mut prev: Option<&ActivityLog> = None;
    for log in logs {
        let delta = match prev {
            Some(p) => log.with_values(log.step - p.step, log.distance - p.distance),
            None => log.clone(),
        };
        deltas.push(delta);
        prev = Some(log);
    }
    deltas
}

/// Summary of a single tracking session.
///
/// `exercise_minutes + rest_minutes == total_time_minutes` always holds:
/// rest is whatever remains after exercise is classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ActivityStat {
    /// Whole minutes between first and last sample
    pub total_time_minutes: i64,
    /// Distance in meters
    pub total_distance: i64,
    pub total_steps: i64,
    pub exercise_minutes: i64,
    pub rest_minutes: i64,
    /// Unix timestamp of the first sample
    pub start_time: Option<i64>,
    /// Unix timestamp of the last sample
    pub end_time: Option<i64>,
}

impl ActivityStat {
    /// Average speed in meters per minute (0.0 for zero-length sessions).
    pub fn average_speed(&self) -> f64 {
        if self.total_time_minutes > 0 {
            self.total_distance as f64 / self.total_time_minutes as f64
        } else {
            0.0
        }
    }
}

/// Averages across a history of climbs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct AverageActivityStat {
    pub average_total_minutes: i64,
    pub average_exercise_minutes: i64,
    pub average_rest_minutes: i64,
    /// Meters per minute over all valid records combined
    pub average_speed: f64,
    /// Number of records with a non-empty log
    pub record_count: u32,
}

/// A finished climb with its activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct ClimbRecord {
    pub id: String,
    pub mountain_name: String,
    pub time_log: Vec<ActivityLog>,
}

impl ClimbRecord {
    pub fn new(mountain_name: impl Into<String>, time_log: Vec<ActivityLog>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mountain_name: mountain_name.into(),
            time_log,
        }
    }

    /// Records with an empty log are left out of every average.
    pub fn is_valid(&self) -> bool {
        !self.time_log.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

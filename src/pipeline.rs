//! Correction and smoothing wired together behind one validated config.

use crate::error::Result;
use crate::{
    activity_stat, average_activity_stat, correct_logs, smooth_logs, ActivityLog, ActivityStat,
    AverageActivityStat, ClimbRecord, PipelineConfig,
};

/// Run correction, then smoothing, over a raw log sequence.
pub fn clean_logs(logs: &[ActivityLog], config: &PipelineConfig) -> Vec<ActivityLog> {
    let corrected = correct_logs(logs, config);
    smooth_logs(&corrected, config)
}

/// The activity pipeline with a validated configuration.
///
/// Holds no state besides its config, so one instance can be shared across
/// threads and reused for any number of sessions.
#[derive(Debug, Clone, Default)]
pub struct ActivityPipeline {
    config: PipelineConfig,
}

impl ActivityPipeline {
    /// Create a pipeline, rejecting out-of-range settings.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Correction followed by smoothing.
    pub fn clean(&self, logs: &[ActivityLog]) -> Vec<ActivityLog> {
        clean_logs(logs, &self.config)
    }

    pub fn correct(&self, logs: &[ActivityLog]) -> Vec<ActivityLog> {
        correct_logs(logs, &self.config)
    }

    pub fn smooth(&self, logs: &[ActivityLog]) -> Vec<ActivityLog> {
        smooth_logs(logs, &self.config)
    }

    pub fn stat(&self, logs: &[ActivityLog]) -> ActivityStat {
        activity_stat(logs, &self.config)
    }

    pub fn average(&self, records: &[ClimbRecord]) -> AverageActivityStat {
        average_activity_stat(records, &self.config)
    }
}

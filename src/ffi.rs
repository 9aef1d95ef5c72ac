//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose the activity pipeline
//! to Kotlin and Swift. All FFI functions are prefixed with `ffi_` to avoid
//! naming conflicts with the internal API.

use log::info;

use crate::{
    activity_stat, average_activity_stat, clean_logs, init_logging, ActivityError, ActivityLog,
    ActivityStat, AverageActivityStat, ClimbRecord, PipelineConfig,
};

/// Default pipeline configuration, for the app's settings screen.
#[uniffi::export]
pub fn ffi_default_pipeline_config() -> PipelineConfig {
    PipelineConfig::default()
}

/// Fall back to the default config and reject out-of-range settings.
fn resolve_config(config: Option<PipelineConfig>) -> Result<PipelineConfig, ActivityError> {
    let config = config.unwrap_or_default();
    config.validate()?;
    Ok(config)
}

/// Correct and smooth a raw session log.
#[uniffi::export]
pub fn ffi_clean_activity_logs(
    logs: Vec<ActivityLog>,
    config: Option<PipelineConfig>,
) -> Result<Vec<ActivityLog>, ActivityError> {
    init_logging();
    let config = resolve_config(config)?;

    let start = std::time::Instant::now();
    let cleaned = clean_logs(&logs, &config);
    info!(
        "[ClimbActivityRust] Cleaned {} samples in {:?}",
        cleaned.len(),
        start.elapsed()
    );
    Ok(cleaned)
}

/// Summary of one climb.
#[uniffi::export]
pub fn ffi_activity_stat(
    logs: Vec<ActivityLog>,
    config: Option<PipelineConfig>,
) -> Result<ActivityStat, ActivityError> {
    init_logging();
    let stat = activity_stat(&logs, &resolve_config(config)?);
    info!(
        "[ClimbActivityRust] Stat for {} samples: {} min ({} exercise)",
        logs.len(),
        stat.total_time_minutes,
        stat.exercise_minutes
    );
    Ok(stat)
}

/// Summary of one climb as a JSON string, for the widget extension.
#[uniffi::export]
pub fn ffi_activity_stat_json(
    logs: Vec<ActivityLog>,
    config: Option<PipelineConfig>,
) -> Result<String, ActivityError> {
    init_logging();
    let stat = activity_stat(&logs, &resolve_config(config)?);
    Ok(serde_json::to_string(&stat).unwrap_or_else(|_| "{}".to_string()))
}

/// Averages across a climb history.
#[uniffi::export]
pub fn ffi_average_activity_stat(
    records: Vec<ClimbRecord>,
    config: Option<PipelineConfig>,
) -> Result<AverageActivityStat, ActivityError> {
    init_logging();
    let config = resolve_config(config)?;

    let start = std::time::Instant::now();
    let average = average_activity_stat(&records, &config);
    info!(
        "[ClimbActivityRust] Averaged {} of {} records in {:?}",
        average.record_count,
        records.len(),
        start.elapsed()
    );
    Ok(average)
}

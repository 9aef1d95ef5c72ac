//! Single-climb statistics.
//!
//! Every full bucket after the session-start placeholder counts as exercise
//! when its step value reaches the exercise threshold. The final bucket is
//! usually cut short when the user stops tracking, so it is judged by pace
//! instead and credited with its actual elapsed minutes.

use log::debug;

use crate::{
    interval_deltas, whole_minutes, ActivityLog, ActivityStat, LogSemantics, PipelineConfig,
};

/// Compute the summary of one tracking session.
///
/// `step`/`distance` are read according to `config.log_semantics`; by
/// default they are running totals and totals equal the last sample.
/// Empty input yields `ActivityStat::default()`. Logs are expected in
/// ascending time order; unordered input is not rejected and can produce
/// negative minute counts.
pub fn activity_stat(logs: &[ActivityLog], config: &PipelineConfig) -> ActivityStat {
    let (first, last) = match (logs.first(), logs.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return ActivityStat::default(),
    };

    let normalized;
    let logs = match config.log_semantics {
        LogSemantics::PerInterval => logs,
        LogSemantics::Cumulative => {
            normalized = interval_deltas(logs);
            normalized.as_slice()
        }
    };

    let total_time_minutes = whole_minutes(first.time, last.time);
    let total_steps: i64 = logs.iter().map(|l| l.step).sum();
    let total_distance: i64 = logs.iter().map(|l| l.distance).sum();
    let exercise = exercise_minutes(logs, config);

    debug!(
        "[Stats] {} samples: {} min total, {} min exercise",
        logs.len(),
        total_time_minutes,
        exercise
    );

    ActivityStat {
        total_time_minutes,
        total_distance,
        total_steps,
        exercise_minutes: exercise,
        rest_minutes: total_time_minutes - exercise,
        start_time: Some(first.time),
        end_time: Some(last.time),
    }
}

/// Exercise minutes with pace-based handling of the final bucket.
///
/// The first sample closes no interval and is skipped. Samples in between
/// credit `bucket_minutes` each when `step >= exercise_step_threshold`.
/// The last sample credits the whole minutes since its predecessor when its
/// pace reaches `exercise_pace_threshold`; a zero-minute tail credits nothing.
pub fn exercise_minutes(logs: &[ActivityLog], config: &PipelineConfig) -> i64 {
    if logs.len() < 2 {
        return 0;
    }
    let last_index = logs.len() - 1;

    let full_buckets = logs[1..last_index]
        .iter()
        .filter(|l| l.step >= config.exercise_step_threshold)
        .count() as i64;

    let tail = &logs[last_index];
    let tail_minutes = whole_minutes(logs[last_index - 1].time, tail.time);
    let tail_exercise = if tail_minutes > 0 {
        let pace = tail.step as f64 / tail_minutes as f64;
        if pace >= config.exercise_pace_threshold {
            tail_minutes
        } else {
            0
        }
    } else {
        0
    };

    full_buckets * config.bucket_minutes + tail_exercise
}

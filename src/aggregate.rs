//! Average statistics across a climb history.
//!
//! Unlike the per-climb engine, every interval here is classified on the
//! same footing: the elapsed minutes between two samples are exercise when
//! the later sample reaches the exercise step threshold, rest otherwise.
//! There is no special handling of the final interval.
//!
//! ## Example
//! ```rust
//! use climb_activity::{average_activity_stat, ActivityLog, ClimbRecord, PipelineConfig};
//!
//! let record = ClimbRecord::new("Bukhansan", vec![
//!     ActivityLog::session_start(0),
//!     ActivityLog::new(600, 800, 500),
//! ]);
//! let avg = average_activity_stat(&[record], &PipelineConfig::default());
//! assert_eq!(avg.average_total_minutes, 10);
//! assert_eq!(avg.average_speed, 50.0);
//! ```

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    interval_deltas, whole_minutes, ActivityLog, AverageActivityStat, ClimbRecord, LogSemantics,
    PipelineConfig,
};

/// Record count above which the parallel path is used.
#[cfg(feature = "parallel")]
pub const PARALLEL_RECORD_THRESHOLD: usize = 256;

/// Per-record totals feeding the averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub minutes: i64,
    pub exercise_minutes: i64,
    pub rest_minutes: i64,
    pub distance: i64,
}

impl RecordSummary {
    fn combine(self, other: Self) -> Self {
        Self {
            minutes: self.minutes + other.minutes,
            exercise_minutes: self.exercise_minutes + other.exercise_minutes,
            rest_minutes: self.rest_minutes + other.rest_minutes,
            distance: self.distance + other.distance,
        }
    }
}

/// Split the elapsed time of consecutive pairs into exercise and rest.
///
/// Each pair's whole minutes go entirely to one side, decided by the later
/// sample's step value. Because every pair is truncated separately the two
/// sides can sum to less than the record's overall minutes.
pub fn split_exercise_rest(logs: &[ActivityLog], config: &PipelineConfig) -> (i64, i64) {
    logs.windows(2).fold((0, 0), |(exercise, rest), pair| {
        let minutes = whole_minutes(pair[0].time, pair[1].time);
        if pair[1].step < config.exercise_step_threshold {
            (exercise, rest + minutes)
        } else {
            (exercise + minutes, rest)
        }
    })
}

/// Summarize one record, or `None` when its log is empty.
pub fn summarize_record(record: &ClimbRecord, config: &PipelineConfig) -> Option<RecordSummary> {
    if !record.is_valid() {
        return None;
    }

    let mut sorted = record.time_log.clone();
    sorted.sort_by_key(|l| l.time);
    let logs = match config.log_semantics {
        LogSemantics::PerInterval => sorted,
        LogSemantics::Cumulative => interval_deltas(&sorted),
    };

    let minutes = match (logs.first(), logs.last()) {
        (Some(first), Some(last)) => whole_minutes(first.time, last.time),
        _ => 0,
    };
    let (exercise_minutes, rest_minutes) = split_exercise_rest(&logs, config);
    let distance = logs.iter().map(|l| l.distance).sum();

    Some(RecordSummary {
        minutes,
        exercise_minutes,
        rest_minutes,
        distance,
    })
}

/// Average the statistics of all records with a non-empty log.
///
/// Minute averages use truncating integer division. `average_speed` is the
/// combined distance over the combined minutes, not a mean of per-record
/// speeds. With no valid records the all-zero value is returned.
pub fn average_activity_stat(
    records: &[ClimbRecord],
    config: &PipelineConfig,
) -> AverageActivityStat {
    #[cfg(feature = "parallel")]
    let (count, totals) = if records.len() >= PARALLEL_RECORD_THRESHOLD {
        summarize_parallel(records, config)
    } else {
        summarize_sequential(records, config)
    };

    #[cfg(not(feature = "parallel"))]
    let (count, totals) = summarize_sequential(records, config);

    debug!(
        "[Aggregate] {} of {} records valid, {} min total",
        count,
        records.len(),
        totals.minutes
    );

    if count == 0 {
        return AverageActivityStat::default();
    }

    let n = count as i64;
    let average_speed = if totals.minutes != 0 {
        totals.distance as f64 / totals.minutes as f64
    } else {
        0.0
    };

    AverageActivityStat {
        average_total_minutes: totals.minutes / n,
        average_exercise_minutes: totals.exercise_minutes / n,
        average_rest_minutes: totals.rest_minutes / n,
        average_speed,
        record_count: count as u32,
    }
}

fn summarize_sequential(
    records: &[ClimbRecord],
    config: &PipelineConfig,
) -> (usize, RecordSummary) {
    records
        .iter()
        .filter_map(|r| summarize_record(r, config))
        .fold((0, RecordSummary::default()), |(count, acc), s| {
            (count + 1, acc.combine(s))
        })
}

#[cfg(feature = "parallel")]
fn summarize_parallel(
    records: &[ClimbRecord],
    config: &PipelineConfig,
) -> (usize, RecordSummary) {
    records
        .par_iter()
        .filter_map(|r| summarize_record(r, config))
        .fold(
            || (0usize, RecordSummary::default()),
            |(count, acc), s| (count + 1, acc.combine(s)),
        )
        .reduce(
            || (0usize, RecordSummary::default()),
            |(c1, s1), (c2, s2)| (c1 + c2, s1.combine(s2)),
        )
}

//! End-to-end scenarios: raw tracker samples through cleaning and statistics.
//!
//! Run with: `cargo test --test pipeline_scenarios`

use climb_activity::{
    activity_stat, average_activity_stat, clean_logs, collect_clean_logs, correct_logs,
    ActivityLog, ActivityPipeline, ActivityTracker, AverageActivityStat, ClimbRecord,
    LogSemantics, PipelineConfig, ReplayTracker,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const T0: i64 = 1_700_000_000;
const BUCKET: i64 = 5 * 60;

fn values(logs: &[ActivityLog]) -> Vec<(i64, i64)> {
    logs.iter().map(|l| (l.step, l.distance)).collect()
}

/// First sample zero, then `count` non-decreasing samples every 5 minutes.
fn random_session(seed: u64, count: usize) -> Vec<ActivityLog> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut logs = vec![ActivityLog::session_start(T0)];
    let (mut step, mut distance) = (0i64, 0i64);
    for i in 1..=count as i64 {
        step += rng.gen_range(0..400);
        distance += rng.gen_range(0..300);
        logs.push(ActivityLog::new(T0 + i * BUCKET, step, distance));
    }
    logs
}

// ============================================================================
// Scenario 1: burst correction ahead of smoothing
// ============================================================================

#[test]
fn test_burst_is_split_before_smoothing() {
    let raw = vec![
        ActivityLog::session_start(T0),
        ActivityLog::new(T0 + BUCKET, 150, 120),
        ActivityLog::new(T0 + 2 * BUCKET, 400, 250),
    ];
    let config = PipelineConfig::default();

    let corrected = correct_logs(&raw, &config);
    assert_eq!(values(&corrected), vec![(0, 0), (275, 185), (275, 185)]);

    // Smoothing seeds on the first active sample, and both samples agree
    let cleaned = clean_logs(&raw, &config);
    assert_eq!(values(&cleaned), vec![(0, 0), (275, 185), (275, 185)]);
    for (r, c) in raw.iter().zip(&cleaned) {
        assert_eq!(r.id, c.id);
        assert_eq!(r.time, c.time);
    }
}

#[test]
fn test_smooth_series_untouched_by_correction() {
    let raw: Vec<ActivityLog> = (0..12)
        .map(|i| ActivityLog::new(T0 + i * BUCKET, i * 120, i * 90))
        .collect();
    assert_eq!(correct_logs(&raw, &PipelineConfig::default()), raw);
}

// ============================================================================
// Scenario 2: 40-sample session statistics
// ============================================================================

#[test]
fn test_forty_sample_session() {
    let pipeline = ActivityPipeline::default();
    for seed in [1u64, 7, 42] {
        let raw = random_session(seed, 39);
        assert_eq!(raw.len(), 40);

        for logs in [raw.clone(), pipeline.clean(&raw)] {
            let stat = pipeline.stat(&logs);
            let last = logs.last().unwrap();
            // Running totals: the session totals are the last sample
            assert_eq!(stat.total_steps, last.step);
            assert_eq!(stat.total_distance, last.distance);
            assert_eq!(stat.total_time_minutes, 195);
            // Every bucket, including the last, spans exactly 5 minutes
            assert_eq!(stat.exercise_minutes % 5, 0);
            assert!(stat.exercise_minutes <= 195);
            assert_eq!(stat.exercise_minutes + stat.rest_minutes, 195);
            assert_eq!(stat.start_time, Some(T0));
            assert_eq!(stat.end_time, Some(T0 + 39 * BUCKET));
        }
    }
}

#[test]
fn test_per_interval_session_totals() {
    let raw = random_session(3, 39);
    let config = PipelineConfig {
        log_semantics: LogSemantics::PerInterval,
        ..Default::default()
    };
    let stat = activity_stat(&raw, &config);
    assert_eq!(stat.total_steps, raw.iter().map(|l| l.step).sum::<i64>());
    assert_eq!(stat.total_distance, raw.iter().map(|l| l.distance).sum::<i64>());
    assert_eq!(stat.total_time_minutes, 195);
}

#[test]
fn test_partial_final_bucket() {
    // Tracking stopped 3 minutes into the last bucket
    let logs = vec![
        ActivityLog::session_start(T0),
        ActivityLog::new(T0 + BUCKET, 300, 200),
        ActivityLog::new(T0 + 2 * BUCKET, 620, 410),
        ActivityLog::new(T0 + 2 * BUCKET + 180, 710, 470),
    ];
    let stat = activity_stat(&logs, &PipelineConfig::default());
    // Buckets of 300 and 320 steps, then 90 steps in 3 minutes
    assert_eq!(stat.total_steps, 710);
    assert_eq!(stat.total_time_minutes, 13);
    assert_eq!(stat.exercise_minutes, 13);
    assert_eq!(stat.rest_minutes, 0);
}

// ============================================================================
// Scenario 3: averages across a climb history
// ============================================================================

#[test]
fn test_history_average_skips_empty_records() {
    let short_climb = ClimbRecord::new(
        "Gwanaksan",
        vec![
            ActivityLog::session_start(T0),
            ActivityLog::new(T0 + 1800, 150, 200),
            ActivityLog::new(T0 + 3600, 200, 500),
        ],
    );
    let long_climb = ClimbRecord::new(
        "Jirisan",
        vec![
            ActivityLog::session_start(T0),
            ActivityLog::new(T0 + 3600, 300, 500),
            ActivityLog::new(T0 + 7200, 700, 1200),
        ],
    );
    let abandoned = ClimbRecord::new("Seoraksan", vec![]);

    let avg = average_activity_stat(
        &[short_climb, abandoned, long_climb],
        &PipelineConfig::default(),
    );

    assert_eq!(avg.record_count, 2);
    assert_eq!(avg.average_total_minutes, 90);
    assert_eq!(avg.average_exercise_minutes, 75);
    assert_eq!(avg.average_rest_minutes, 15);
    assert!((avg.average_speed - 1700.0 / 180.0).abs() < 1e-9);
    assert!((avg.average_speed - 9.444).abs() < 0.001);
}

#[test]
fn test_history_all_empty() {
    let records = vec![ClimbRecord::new("A", vec![]), ClimbRecord::new("B", vec![])];
    assert_eq!(
        average_activity_stat(&records, &PipelineConfig::default()),
        AverageActivityStat::default()
    );
}

// ============================================================================
// Tracker boundary
// ============================================================================

#[test]
fn test_tracked_session_to_summary() {
    let mut tracker = ReplayTracker::new(vec![
        (BUCKET, 150, 120),
        (2 * BUCKET, 400, 250),
        (3 * BUCKET, 520, 340),
    ]);
    tracker.request_authorization().unwrap();
    tracker.start_tracking(T0).unwrap();
    tracker.advance_to(T0 + 3 * BUCKET);

    let pipeline = ActivityPipeline::default();
    let cleaned = collect_clean_logs(&tracker, &pipeline).unwrap();
    tracker.stop_tracking();

    assert_eq!(cleaned.len(), 4);
    assert!(cleaned[0].is_idle());
    let stat = pipeline.stat(&cleaned);
    let last = cleaned.last().unwrap();
    assert_eq!(stat.total_steps, last.step);
    assert_eq!(stat.total_distance, last.distance);
    assert_eq!(stat.total_time_minutes, 15);
    assert_eq!(stat.exercise_minutes + stat.rest_minutes, 15);

    // The raw tracker series reads the same way
    tracker.start_tracking(T0).unwrap();
    tracker.advance_to(T0 + 3 * BUCKET);
    let raw = tracker.activity_logs().unwrap();
    let stat = pipeline.stat(&raw);
    assert_eq!(stat.total_steps, 520);
    assert_eq!(stat.total_distance, 340);
    // Deltas of 150 and 250 steps, then 120 steps over 5 minutes
    assert_eq!(stat.exercise_minutes, 15);
}

#[test]
fn test_stat_json_shape() {
    let logs = vec![
        ActivityLog::session_start(T0),
        ActivityLog::new(T0 + BUCKET, 200, 150),
    ];
    let stat = activity_stat(&logs, &PipelineConfig::default());
    let json: serde_json::Value = serde_json::to_value(&stat).unwrap();
    assert_eq!(json["totalTimeMinutes"], 5);
    assert_eq!(json["exerciseMinutes"], 5);
    assert_eq!(json["startTime"], T0);
}

//! Boundary to the platform pedometer.
//!
//! The host app implements [`ActivityTracker`] on top of the OS motion APIs.
//! Failures (authorization denied, query errors, no session) are reported
//! here, before any samples reach the pipeline.

use log::{debug, warn};
use uuid::Uuid;

use crate::error::{ActivityError, Result};
use crate::{ActivityLog, ActivityPipeline};

/// Source of raw activity samples for one tracking session.
pub trait ActivityTracker {
    /// Ask the platform for motion data access.
    fn request_authorization(&mut self) -> Result<()>;

    /// Begin a session at `start_time` (unix seconds).
    fn start_tracking(&mut self, start_time: i64) -> Result<()>;

    /// Samples recorded so far, oldest first, starting with the zero placeholder.
    fn activity_logs(&self) -> Result<Vec<ActivityLog>>;

    fn stop_tracking(&mut self);

    fn is_tracking(&self) -> bool;
}

/// Fetch the current session's samples and run them through the pipeline.
pub fn collect_clean_logs<T: ActivityTracker + ?Sized>(
    tracker: &T,
    pipeline: &ActivityPipeline,
) -> Result<Vec<ActivityLog>> {
    let raw = tracker.activity_logs()?;
    debug!("[Tracker] Cleaning {} raw samples", raw.len());
    Ok(pipeline.clean(&raw))
}

/// A recorded sample, positioned relative to session start.
#[derive(Debug, Clone)]
struct ReplaySample {
    id: String,
    offset: i64,
    step: i64,
    distance: i64,
}

/// Tracker that replays a prerecorded sample sequence.
///
/// Samples are released as the session clock passes their offset, which
/// makes it usable for demos and for driving the pipeline in tests.
#[derive(Debug, Clone)]
pub struct ReplayTracker {
    samples: Vec<ReplaySample>,
    authorized: bool,
    grant_authorization: bool,
    start: Option<ActivityLog>,
    clock: i64,
}

impl ReplayTracker {
    /// Samples are `(offset_seconds, step, distance)` relative to session start.
    ///
    /// Offset 0 belongs to the session-start placeholder, so samples with an
    /// offset of zero or less are never released.
    pub fn new(samples: Vec<(i64, i64, i64)>) -> Self {
        Self {
            samples: samples
                .into_iter()
                .map(|(offset, step, distance)| ReplaySample {
                    id: Uuid::new_v4().to_string(),
                    offset,
                    step,
                    distance,
                })
                .collect(),
            authorized: false,
            grant_authorization: true,
            start: None,
            clock: 0,
        }
    }

    /// A tracker whose authorization request is refused.
    pub fn denied() -> Self {
        Self {
            grant_authorization: false,
            ..Self::new(Vec::new())
        }
    }

    /// Move the session clock forward to `now` (unix seconds).
    pub fn advance_to(&mut self, now: i64) {
        self.clock = now;
    }
}

impl ActivityTracker for ReplayTracker {
    fn request_authorization(&mut self) -> Result<()> {
        self.authorized = self.grant_authorization;
        if self.authorized {
            Ok(())
        } else {
            warn!("[Tracker] Motion access refused");
            Err(ActivityError::AuthorizationDenied)
        }
    }

    fn start_tracking(&mut self, start_time: i64) -> Result<()> {
        if !self.authorized {
            return Err(ActivityError::AuthorizationDenied);
        }
        self.start = Some(ActivityLog::session_start(start_time));
        self.clock = start_time;
        Ok(())
    }

    fn activity_logs(&self) -> Result<Vec<ActivityLog>> {
        let start = self.start.as_ref().ok_or(ActivityError::NotTracking)?;
        let mut logs = vec![start.clone()];
        logs.extend(
            self.samples
                .iter()
                .filter(|s| s.offset > 0 && start.time + s.offset <= self.clock)
                .map(|s| {
                    ActivityLog::with_id(s.id.clone(), start.time + s.offset, s.step, s.distance)
                }),
        );
        Ok(logs)
    }

    fn stop_tracking(&mut self) {
        self.start = None;
    }

    fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

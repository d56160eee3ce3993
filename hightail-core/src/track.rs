//! Live-location tracking with throttled map-following.
//!
//! A two-state machine: `Idle` until tracking starts, then `Tracking`
//! while the platform glue feeds position fixes in. Fixes are throttled
//! so the map is not re-centred on every minor jitter; dropped fixes are
//! simply discarded, never queued.

use std::time::Duration;

use log::{debug, warn};

use crate::distance::haversine_meters;
use crate::location::{LocationError, PositionFix};

/// Minimum time between two applied fixes.
pub const MIN_APPLY_INTERVAL: Duration = Duration::from_millis(1500);

/// Minimum movement between two applied fixes, in metres.
pub const MIN_APPLY_DISTANCE_M: f64 = 8.0;

/// Whether the tracker is consuming position fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No watch is active; incoming fixes are ignored.
    #[default]
    Idle,
    /// A watch is active and fixes are throttled into view updates.
    Tracking,
}

/// What the tracker did with an observed fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixDisposition {
    /// The fix became the new live position; the view should follow it.
    Applied,
    /// Dropped: too little time since the last applied fix.
    TooSoon,
    /// Dropped: the position moved less than the distance floor.
    TooClose,
    /// Ignored: the tracker is idle.
    NotTracking,
}

/// Throttled live-position state machine.
///
/// The first fix after entering `Tracking` always applies; every later
/// fix must clear both the interval and the distance floor, measured
/// against the last *applied* fix.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use hightail_core::{FixDisposition, PositionFix, Tracker};
///
/// let mut tracker = Tracker::new();
/// tracker.start();
///
/// let fix = PositionFix {
///     location: Coord { x: 140.7257, y: 41.7753 },
///     accuracy_meters: 5.0,
///     timestamp: Duration::ZERO,
/// };
/// assert_eq!(tracker.observe(fix), FixDisposition::Applied);
/// ```
#[derive(Debug, Default)]
pub struct Tracker {
    state: TrackerState,
    last_applied: Option<PositionFix>,
}

impl Tracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Whether a watch is active.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.state == TrackerState::Tracking
    }

    /// The most recently applied fix, if tracking has applied one.
    #[must_use]
    pub fn last_applied(&self) -> Option<&PositionFix> {
        self.last_applied.as_ref()
    }

    /// Begin consuming fixes. The next observed fix always applies.
    pub fn start(&mut self) {
        self.state = TrackerState::Tracking;
        self.last_applied = None;
    }

    /// Stop consuming fixes and forget the live position.
    pub fn stop(&mut self) {
        self.state = TrackerState::Idle;
        self.last_applied = None;
    }

    /// Force-stop after a provider failure, logging the reason.
    ///
    /// The platform glue cancels its watch subscription; the tracker only
    /// records the transition.
    pub fn fail(&mut self, error: &LocationError) {
        warn!("location watch failed, stopping tracking: {error}");
        self.stop();
    }

    /// Throttle an incoming fix into a view update or drop it.
    pub fn observe(&mut self, fix: PositionFix) -> FixDisposition {
        if self.state != TrackerState::Tracking {
            return FixDisposition::NotTracking;
        }

        if let Some(last) = &self.last_applied {
            let elapsed = fix.timestamp.saturating_sub(last.timestamp);
            if elapsed < MIN_APPLY_INTERVAL {
                return FixDisposition::TooSoon;
            }
            let moved = haversine_meters(last.location, fix.location);
            if moved < MIN_APPLY_DISTANCE_M {
                return FixDisposition::TooClose;
            }
            debug!("applying tracked fix after {elapsed:?} and {moved:.1} m");
        }

        self.last_applied = Some(fix);
        FixDisposition::Applied
    }
}

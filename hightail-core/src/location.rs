//! Device position fixes from an external location provider.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

/// A single position fix.
///
/// `timestamp` is a monotonic offset supplied by the provider (time since
/// it started delivering fixes); the tracking throttle compares offsets
/// rather than reading a clock of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    /// WGS84 position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Estimated accuracy radius in metres.
    pub accuracy_meters: f64,
    /// Monotonic offset at which the fix was taken.
    pub timestamp: Duration,
}

/// Reasons a location provider fails to deliver a fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user denied access to device location.
    #[error("location permission was denied")]
    PermissionDenied,
    /// No fix arrived within the provider's time limit.
    #[error("timed out waiting for a position fix")]
    Timeout,
    /// The position could not be determined.
    #[error("position unavailable: {message}")]
    Unavailable {
        /// Provider-supplied description.
        message: String,
    },
}

/// One-shot access to the device position.
///
/// Continuous watches are driven by the platform glue, which feeds each
/// fix to [`Tracker::observe`](crate::Tracker::observe); this trait only
/// covers the single fresh fix the "evacuate from current location"
/// action needs when tracking is off.
pub trait LocationProvider {
    /// Request a single fresh position fix.
    fn current_position(&self) -> Result<PositionFix, LocationError>;
}

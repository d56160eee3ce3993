//! Walking-route rendering against an external directions service.
//!
//! Drawing the route is delegated to a collaborator; this crate only
//! cares about the outcome and the leg-level figures a rendered route
//! reports, which take precedence over the batch query's numbers because
//! they describe the exact path drawn.

use geo::Coord;
use thiserror::Error;

/// Distance and duration of the single walking leg of a rendered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    /// Walking distance in metres.
    pub distance_meters: u32,
    /// Human-readable duration, e.g. `"12 mins"`.
    pub duration_text: String,
}

/// Outcome of a successful route render.
///
/// The leg is optional; some responses omit leg-level figures, in which
/// case the previously resolved distance and duration stand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteSummary {
    /// Leg-level figures for the drawn path, when reported.
    pub leg: Option<RouteLeg>,
}

/// Errors from [`DirectionsProvider::walking_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The service reported a failure status of its own.
    #[error("directions service error {code}: {message}")]
    Service {
        /// Service status code, embedded verbatim.
        code: String,
        /// Accompanying message, possibly empty.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("directions request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("directions request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed before an HTTP response arrived.
    #[error("network error reaching {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

/// Produce a walking route between two points for display.
pub trait DirectionsProvider {
    /// Request a walking route from `origin` to `destination`.
    fn walking_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteSummary, DirectionsError>;
}

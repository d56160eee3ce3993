//! Core engine for the Hightail evacuation guidance widget.
//!
//! Given a start point and a static collection of evacuation shelters,
//! this crate selects a bounded candidate set, resolves the
//! walking-nearest destination through an external distance-matrix
//! service, and tracks the per-session display state — including the
//! graceful-degradation paths the routing service forces on it (partial
//! element failure, oversized batches, total outage).
//!
//! External collaborators — the routing service, the route renderer and
//! the device location provider — sit behind synchronous traits so the
//! crate stays embeddable in synchronous contexts; async implementations
//! bridge internally (see the `hightail-data` crate).

pub mod directions;
pub mod distance;
pub mod index;
pub mod lang;
pub mod link;
pub mod location;
pub mod matrix;
pub mod resolve;
pub mod select;
pub mod session;
pub mod shelter;
pub mod track;

#[doc(hidden)]
pub mod test_support;

pub use directions::{DirectionsError, DirectionsProvider, RouteLeg, RouteSummary};
pub use distance::{EARTH_RADIUS_M, haversine_meters};
pub use index::ShelterIndex;
pub use lang::{Lang, LangParseError};
pub use link::walking_directions_url;
pub use location::{LocationError, LocationProvider, PositionFix};
pub use matrix::{DistanceMatrixProvider, MatrixElement, MatrixError};
pub use resolve::{Resolution, ResolveError, resolve_nearest, resolve_straight_line};
pub use select::{
    CandidateSelection, MAX_MATRIX_DESTINATIONS, NARROWED_RADIUS_M, SEARCH_RADIUS_M,
    SelectionNote, nearest_subset, select_candidates,
};
pub use session::{GuidanceSession, LookupSeq, SessionError, SessionUpdate};
pub use shelter::{Shelter, ShelterKind};
pub use track::{
    FixDisposition, MIN_APPLY_DISTANCE_M, MIN_APPLY_INTERVAL, Tracker, TrackerState,
};

//! Facade crate for the Hightail evacuation guidance engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP-backed
//! feed and routing collaborators behind a feature flag.

#![forbid(unsafe_code)]

pub use hightail_core::{
    CandidateSelection, DirectionsError, DirectionsProvider, DistanceMatrixProvider,
    FixDisposition, GuidanceSession, Lang, LocationError, LocationProvider, LookupSeq,
    MatrixElement, MatrixError, PositionFix, Resolution, ResolveError, RouteLeg, RouteSummary,
    SelectionNote, SessionError, SessionUpdate, Shelter, ShelterIndex, ShelterKind, Tracker,
    TrackerState, haversine_meters, resolve_nearest, resolve_straight_line, select_candidates,
    walking_directions_url,
};

#[cfg(feature = "http-providers")]
pub use hightail_data::{
    FeedClient, FeedClientConfig, FeedError, HttpDirectionsProvider, HttpDistanceMatrixProvider,
    MapsApiConfig,
};

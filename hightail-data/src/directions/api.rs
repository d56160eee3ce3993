//! Directions API response types.

use serde::Deserialize;

use crate::wire::ValueText;

/// Top-level success status.
pub const STATUS_OK: &str = "OK";

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Top-level status code; `"OK"` when at least one route was found.
    pub status: String,

    /// Optional error description when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<RouteResponse>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Route legs; a single origin/destination request has one leg.
    #[serde(default)]
    pub legs: Vec<LegResponse>,
}

/// One leg of a route.
#[derive(Debug, Deserialize)]
pub struct LegResponse {
    /// Leg distance, when reported.
    #[serde(default)]
    pub distance: Option<ValueText>,

    /// Leg duration, when reported.
    #[serde(default)]
    pub duration: Option<ValueText>,
}

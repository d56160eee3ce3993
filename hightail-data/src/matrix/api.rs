//! Distance Matrix API response types.
//!
//! The API answers one-origin, many-destination queries with a top-level
//! status, one row per origin and one element per destination. Elements
//! carry their own status; a non-OK element has no usable distance or
//! duration even when the fields happen to be present.

use serde::Deserialize;

use crate::wire::ValueText;

/// Top-level and per-element success status.
pub const STATUS_OK: &str = "OK";

/// Top-level status when the batch exceeds the API's dimension cap.
pub const STATUS_MAX_DIMENSIONS_EXCEEDED: &str = "MAX_DIMENSIONS_EXCEEDED";

/// Distance Matrix API response.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Top-level status code.
    ///
    /// Common values:
    /// - `"OK"` - the request was valid and rows are present
    /// - `"MAX_DIMENSIONS_EXCEEDED"` - too many destinations
    /// - `"OVER_QUERY_LIMIT"`, `"REQUEST_DENIED"`, ... - other failures
    pub status: String,

    /// Optional error description when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,

    /// One row per origin; this engine always sends a single origin.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

impl MatrixResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// One origin's results.
#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    /// One element per requested destination, in request order.
    #[serde(default)]
    pub elements: Vec<MatrixElementResponse>,
}

/// One destination's result.
#[derive(Debug, Deserialize)]
pub struct MatrixElementResponse {
    /// Element status; only `"OK"` elements carry usable figures.
    pub status: String,

    /// Walking distance, when routable.
    #[serde(default)]
    pub distance: Option<ValueText>,

    /// Walking duration, when routable.
    #[serde(default)]
    pub duration: Option<ValueText>,
}

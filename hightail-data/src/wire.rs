//! Wire fragments shared by the mapping provider's JSON APIs.

use serde::Deserialize;

/// A quantity paired with its display text, e.g. `{"value": 480, "text":
/// "0.5 km"}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ValueText {
    /// Numeric value; metres for distances, seconds for durations.
    pub(crate) value: u32,
    /// Human-readable rendering.
    pub(crate) text: String,
}

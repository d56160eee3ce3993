//! Shelter feed loading and normalisation.
//!
//! Two JSON feeds populate the session's shelter collection: an
//! evacuation-building list and a horizontal-evacuation-point list. Feed
//! records carry a `name` plus coordinates in one of two shapes — nested
//! under a `location` object or flat at the top level — and both shapes
//! must be accepted per record. Normalisation happens here, once, rather
//! than duck-typing at each use site.

mod client;

pub use client::{FeedClient, FeedClientConfig};

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use hightail_core::{Shelter, ShelterKind};

/// Errors loading or normalising a shelter feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed body was not valid JSON of the expected shape.
    #[error("failed to parse shelter feed: {source}")]
    Parse {
        /// Decoder error returned by `serde_json`.
        #[from]
        source: serde_json::Error,
    },
    /// A record carried neither coordinate shape.
    #[error("shelter record {name:?} has no usable coordinates")]
    MissingCoordinates {
        /// Name of the offending record.
        name: String,
    },
    /// The feed file could not be read from disk.
    #[error("failed to read shelter feed from {path}: {source}")]
    Io {
        /// Location of the feed file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The feed request did not complete within the configured timeout.
    #[error("shelter feed request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The feed host answered with a non-success HTTP status.
    #[error("shelter feed request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The feed request failed before an HTTP response arrived.
    #[error("network error reaching {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
}

/// Coordinates nested under a record's `location` field.
#[derive(Debug, Default, Deserialize)]
struct RawCoordinates {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

/// One feed record before normalisation.
#[derive(Debug, Deserialize)]
struct RawShelterRecord {
    name: String,
    #[serde(default)]
    location: Option<RawCoordinates>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl RawShelterRecord {
    /// Normalise into a [`Shelter`].
    ///
    /// Precedence is per axis: a nested coordinate wins over its flat
    /// counterpart, and the flat value fills in when the nested one is
    /// absent. A record resolving to neither is rejected.
    fn into_shelter(self, kind: ShelterKind) -> Result<Shelter, FeedError> {
        let nested = self.location.unwrap_or_default();
        let lat = nested.lat.or(self.lat);
        let lng = nested.lng.or(self.lng);
        let (Some(lat), Some(lng)) = (lat, lng) else {
            return Err(FeedError::MissingCoordinates { name: self.name });
        };
        Ok(Shelter::new(self.name, Coord { x: lng, y: lat }, kind))
    }
}

/// Parse one feed body into shelters of the given kind.
///
/// # Examples
/// ```
/// use hightail_core::ShelterKind;
/// use hightail_data::feed::parse_shelters;
///
/// let json = r#"[
///     {"name": "School", "location": {"lat": 41.77, "lng": 140.72}},
///     {"name": "Mound", "lat": 41.78, "lng": 140.73}
/// ]"#;
///
/// let shelters = parse_shelters(json, ShelterKind::Building)?;
/// assert_eq!(shelters.len(), 2);
/// assert_eq!(shelters[0].name, "School");
/// # Ok::<(), hightail_data::feed::FeedError>(())
/// ```
pub fn parse_shelters(json: &str, kind: ShelterKind) -> Result<Vec<Shelter>, FeedError> {
    let records: Vec<RawShelterRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| record.into_shelter(kind))
        .collect()
}

/// Read and parse a feed file.
pub fn load_shelter_file(path: &Utf8Path, kind: ShelterKind) -> Result<Vec<Shelter>, FeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_owned(),
        source,
    })?;
    let shelters = parse_shelters(&json, kind)?;
    debug!("loaded {} shelters from {path}", shelters.len());
    Ok(shelters)
}

/// Merge the two feeds into the session collection, buildings first.
///
/// Insertion order is load order; candidate selection preserves it, so
/// the merge order is part of the engine's deterministic behaviour.
#[must_use]
pub fn merge_feeds(buildings: Vec<Shelter>, horizontal: Vec<Shelter>) -> Vec<Shelter> {
    let mut merged = buildings;
    merged.extend(horizontal);
    merged
}

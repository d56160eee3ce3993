//! Nearest-destination resolution over a batch distance query.
//!
//! Resolution degrades rather than fails wherever it can: destinations
//! the service could not route to are skipped, an all-failed batch falls
//! back to straight-line ranking, and an oversized batch earns exactly
//! one retry against a reduced candidate set.

use geo::Coord;
use log::warn;
use thiserror::Error;

use crate::distance::haversine_meters;
use crate::matrix::{DistanceMatrixProvider, MatrixElement, MatrixError};
use crate::select::{CandidateSelection, MAX_MATRIX_DESTINATIONS, nearest_subset};
use crate::shelter::Shelter;

/// The destination a lookup settled on, with its best-known figures.
///
/// `distance_meters` and `duration_text` are absent when the resolution
/// came from the straight-line fallback; display code substitutes a
/// localized placeholder. A later successful route render overwrites
/// both figures with the drawn path's own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// The chosen shelter.
    pub shelter: Shelter,
    /// Walking distance in metres, when the routing service reported one.
    pub distance_meters: Option<u32>,
    /// Human-readable walking duration, when reported.
    pub duration_text: Option<String>,
}

/// Errors from [`resolve_nearest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The candidate list was empty; no shelter lies within range.
    #[error("no shelters within walking range of the origin")]
    NoSheltersNearby,
    /// The routing service failed and no recovery path applied.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Resolve the walking-nearest shelter among `selection`'s candidates.
///
/// Issues one batch query against `provider` and scans the per-element
/// results:
///
/// - Only elements the service marked reachable are considered; the one
///   with the minimum distance wins, first index breaking ties.
/// - If every element failed, the straight-line nearest candidate is
///   returned with no figures — a degraded but successful outcome.
/// - A batch rejected as too large is retried once against the nearest
///   [`MAX_MATRIX_DESTINATIONS`] candidates; any further failure is
///   surfaced.
///
/// An empty selection returns [`ResolveError::NoSheltersNearby`] without
/// touching the provider.
pub fn resolve_nearest(
    origin: Coord<f64>,
    selection: &CandidateSelection,
    provider: &dyn DistanceMatrixProvider,
) -> Result<Resolution, ResolveError> {
    if selection.is_empty() {
        return Err(ResolveError::NoSheltersNearby);
    }

    match query(origin, &selection.shelters, provider) {
        Ok(resolution) => Ok(resolution),
        Err(MatrixError::TooManyDestinations) => {
            warn!(
                "routing service rejected a batch of {}; retrying with the nearest {}",
                selection.len(),
                MAX_MATRIX_DESTINATIONS
            );
            let subset = nearest_subset(origin, &selection.shelters, MAX_MATRIX_DESTINATIONS);
            query(origin, &subset, provider).map_err(ResolveError::Matrix)
        }
        Err(err) => Err(ResolveError::Matrix(err)),
    }
}

/// Resolve with straight-line distances only, bypassing the routing
/// service entirely.
///
/// Used when no routing collaborator is configured. Unlike the in-band
/// fallback, the straight-line figure is reported as the distance
/// estimate, rounded to whole metres.
pub fn resolve_straight_line(
    origin: Coord<f64>,
    selection: &CandidateSelection,
) -> Result<Resolution, ResolveError> {
    let (shelter, meters) =
        straight_line_nearest(origin, &selection.shelters).ok_or(ResolveError::NoSheltersNearby)?;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "walking distances are non-negative and far below u32::MAX"
    )]
    let rounded = meters.round() as u32;
    Ok(Resolution {
        shelter: shelter.clone(),
        distance_meters: Some(rounded),
        duration_text: None,
    })
}

/// Run one batch query and pick the best element.
fn query(
    origin: Coord<f64>,
    shelters: &[Shelter],
    provider: &dyn DistanceMatrixProvider,
) -> Result<Resolution, MatrixError> {
    let locations: Vec<Coord<f64>> = shelters.iter().map(|shelter| shelter.location).collect();
    let elements = provider.walking_matrix(origin, &locations)?;
    pick_nearest(origin, shelters, &elements)
}

/// Choose the reachable element with the minimum distance, or degrade to
/// straight-line ranking when the whole batch failed.
fn pick_nearest(
    origin: Coord<f64>,
    shelters: &[Shelter],
    elements: &[MatrixElement],
) -> Result<Resolution, MatrixError> {
    let mut best: Option<(&Shelter, u32, Option<&str>)> = None;
    for (shelter, element) in shelters.iter().zip(elements.iter()) {
        let MatrixElement::Reachable {
            distance_meters,
            duration_text,
        } = element
        else {
            continue;
        };
        if best.is_none_or(|(_, held, _)| *distance_meters < held) {
            best = Some((shelter, *distance_meters, duration_text.as_deref()));
        }
    }

    if let Some((shelter, distance, duration)) = best {
        return Ok(Resolution {
            shelter: shelter.clone(),
            distance_meters: Some(distance),
            duration_text: duration.map(str::to_owned),
        });
    }

    warn!("every matrix element failed; falling back to straight-line nearest");
    let (shelter, _) = straight_line_nearest(origin, shelters).ok_or(MatrixError::Parse {
        message: "matrix response carried no elements".to_owned(),
    })?;
    Ok(Resolution {
        shelter: shelter.clone(),
        distance_meters: None,
        duration_text: None,
    })
}

/// First-wins straight-line nearest shelter and its distance.
fn straight_line_nearest(origin: Coord<f64>, shelters: &[Shelter]) -> Option<(&Shelter, f64)> {
    let mut nearest: Option<(&Shelter, f64)> = None;
    for shelter in shelters {
        let meters = haversine_meters(origin, shelter.location);
        if nearest.is_none_or(|(_, held)| meters < held) {
            nearest = Some((shelter, meters));
        }
    }
    nearest
}

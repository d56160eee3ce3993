//! Spatial lookup over the merged shelter collection.
//!
//! The index is populated once, after both shelter feeds have loaded, and
//! is read-only afterwards. Radius queries run an R\*-tree envelope pass
//! first and refine the survivors with exact haversine distances, so the
//! envelope only has to be a conservative over-approximation.

use std::fmt;

use geo::Coord;
use rstar::{AABB, RTree, RTreeObject};

use crate::distance::haversine_meters;
use crate::shelter::Shelter;

/// Metres per degree of latitude at the smallest point of the WGS84
/// ellipsoid. Dividing by this under-estimates nothing, keeping the
/// envelope conservative.
const MIN_M_PER_DEG_LAT: f64 = 110_574.0;

/// Metres per degree of longitude at the equator.
const M_PER_DEG_LNG_EQUATOR: f64 = 111_320.0;

/// Tree entry holding a shelter's position and its insertion ordinal.
#[derive(Debug, Clone, Copy)]
struct PlacedShelter {
    ordinal: usize,
    location: Coord<f64>,
}

impl RTreeObject for PlacedShelter {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x, self.location.y])
    }
}

/// Read-only spatial index over the session's shelters.
///
/// Query results preserve feed insertion order, which keeps candidate
/// selection deterministic for a fixed input order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::{Shelter, ShelterIndex, ShelterKind};
///
/// let origin = Coord { x: 140.7257, y: 41.7753 };
/// let shelters = vec![
///     Shelter::new("Near", Coord { x: 140.7260, y: 41.7753 }, ShelterKind::Building),
///     Shelter::new("Far", Coord { x: 140.8257, y: 41.7753 }, ShelterKind::Building),
/// ];
/// let index = ShelterIndex::new(shelters);
///
/// let nearby = index.within_radius(origin, 700.0);
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].name, "Near");
/// ```
pub struct ShelterIndex {
    shelters: Vec<Shelter>,
    tree: RTree<PlacedShelter>,
}

impl fmt::Debug for ShelterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShelterIndex")
            .field("shelters", &self.shelters.len())
            .finish_non_exhaustive()
    }
}

impl ShelterIndex {
    /// Build an index over the merged shelter collection.
    #[must_use]
    pub fn new(shelters: Vec<Shelter>) -> Self {
        let placed = shelters
            .iter()
            .enumerate()
            .map(|(ordinal, shelter)| PlacedShelter {
                ordinal,
                location: shelter.location,
            })
            .collect();
        Self {
            shelters,
            tree: RTree::bulk_load(placed),
        }
    }

    /// Number of shelters in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    /// Whether the index holds no shelters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    /// Iterate over the shelters in feed insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shelter> + '_ {
        self.shelters.iter()
    }

    /// All shelters within `radius_m` metres of `origin`, inclusive, in
    /// feed insertion order.
    #[must_use]
    pub fn within_radius(&self, origin: Coord<f64>, radius_m: f64) -> Vec<Shelter> {
        let envelope = radius_envelope(origin, radius_m);
        let mut ordinals: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|placed| haversine_meters(origin, placed.location) <= radius_m)
            .map(|placed| placed.ordinal)
            .collect();
        ordinals.sort_unstable();
        ordinals
            .into_iter()
            .filter_map(|ordinal| self.shelters.get(ordinal).cloned())
            .collect()
    }
}

/// Conservative degree-space bounding box around a metric radius.
#[expect(
    clippy::float_arithmetic,
    reason = "degree/metre conversion is inherently floating point"
)]
fn radius_envelope(origin: Coord<f64>, radius_m: f64) -> AABB<[f64; 2]> {
    let d_lat = radius_m / MIN_M_PER_DEG_LAT;
    // Clamp the cosine away from zero so polar origins still produce a
    // finite envelope; the haversine refinement discards the excess.
    let cos_lat = origin.y.to_radians().cos().abs().max(0.01);
    let d_lng = radius_m / (M_PER_DEG_LNG_EQUATOR * cos_lat);
    AABB::from_corners(
        [origin.x - d_lng, origin.y - d_lat],
        [origin.x + d_lng, origin.y + d_lat],
    )
}

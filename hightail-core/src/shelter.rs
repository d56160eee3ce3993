//! Named evacuation destinations.

use geo::Coord;

/// Category of an evacuation destination.
///
/// Buildings offer vertical refuge above the expected inundation level;
/// horizontal sites are open ground outside the hazard area. Each feed
/// carries one kind and the two are merged into a single collection at
/// load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShelterKind {
    /// A designated evacuation building.
    Building,
    /// A horizontal evacuation point.
    Horizontal,
}

/// A named evacuation destination.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
/// Shelters are immutable once constructed; the merged collection is
/// append-only for the lifetime of a session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::{Shelter, ShelterKind};
///
/// let shelter = Shelter::new(
///     "Harbour View School",
///     Coord { x: 140.7257, y: 41.7753 },
///     ShelterKind::Building,
/// );
///
/// assert_eq!(shelter.name, "Harbour View School");
/// assert_eq!(shelter.kind, ShelterKind::Building);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shelter {
    /// Display name of the destination.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Which feed the destination came from.
    pub kind: ShelterKind,
}

impl Shelter {
    /// Construct a shelter from its name, position and kind.
    pub fn new(name: impl Into<String>, location: Coord<f64>, kind: ShelterKind) -> Self {
        Self {
            name: name.into(),
            location,
            kind,
        }
    }
}

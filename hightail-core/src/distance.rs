//! Great-circle distance primitive.
//!
//! Straight-line distances rank shelters during candidate selection and
//! stand in for walking distances whenever the routing service is
//! unavailable or degraded.

use geo::Coord;

/// Earth radius in metres used by the haversine formula.
///
/// The `geo` crate's haversine implementation is pinned to the GRS80 mean
/// radius; this engine matches the routing collaborator's figure instead,
/// so the formula is written out here.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle surface distance between two WGS84 points, in metres.
///
/// Symmetric up to floating-point rounding and zero for coincident
/// points. Coordinates use `x = longitude`, `y = latitude` in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::haversine_meters;
///
/// let a = Coord { x: 140.7257, y: 41.7753 };
/// let b = Coord { x: 140.7357, y: 41.7753 };
///
/// let d = haversine_meters(a, b);
/// assert!(d > 800.0 && d < 850.0);
/// assert_eq!(haversine_meters(a, a), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is inherently floating point"
)]
pub fn haversine_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lng = (b.x - a.x).to_radians();
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ORIGIN: Coord<f64> = Coord {
        x: 140.7257441,
        y: 41.775271,
    };

    #[rstest]
    fn coincident_points_are_zero_apart() {
        assert_eq!(haversine_meters(ORIGIN, ORIGIN), 0.0);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let other = Coord {
            x: 140.7301,
            y: 41.7801,
        };
        let forward = haversine_meters(ORIGIN, other);
        let back = haversine_meters(other, ORIGIN);
        assert!((forward - back).abs() < 1e-9);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let north = Coord {
            x: ORIGIN.x,
            y: ORIGIN.y + 1.0,
        };
        let d = haversine_meters(ORIGIN, north);
        assert!((d - 111_194.9).abs() < 10.0, "got {d}");
    }

    #[rstest]
    fn farther_points_measure_farther() {
        let near = Coord {
            x: ORIGIN.x + 0.001,
            y: ORIGIN.y,
        };
        let far = Coord {
            x: ORIGIN.x + 0.002,
            y: ORIGIN.y,
        };
        assert!(haversine_meters(ORIGIN, near) < haversine_meters(ORIGIN, far));
    }
}

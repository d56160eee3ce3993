//! External-map deep links.

use geo::Coord;

/// Walking-directions deep link for the external maps application.
///
/// Opens the origin-to-destination walking route in the mapping
/// provider's own UI; the caller opens it in a new browsing context.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::walking_directions_url;
///
/// let url = walking_directions_url(
///     Coord { x: 140.7257, y: 41.7753 },
///     Coord { x: 140.7301, y: 41.7801 },
/// );
/// assert_eq!(
///     url,
///     "https://www.google.com/maps/dir/?api=1&origin=41.7753,140.7257\
///      &destination=41.7801,140.7301&travelmode=walking",
/// );
/// ```
#[must_use]
pub fn walking_directions_url(origin: Coord<f64>, destination: Coord<f64>) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=walking",
        origin.y, origin.x, destination.y, destination.x
    )
}

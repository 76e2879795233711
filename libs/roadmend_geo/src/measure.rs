//! Distance measures between positions.

use geo::{Distance, Geodesic};

use crate::LonLat;

/// Distance on the WGS84 ellipsoid between two positions, in metres.
///
/// Uses Karney's geodesic solution, so coincident positions measure
/// exactly `0.0`.
#[inline]
pub fn geodesic_distance(a: LonLat, b: LonLat) -> f64 {
    Geodesic.distance(a.point(), b.point())
}

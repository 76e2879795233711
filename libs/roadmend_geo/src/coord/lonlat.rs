use std::fmt::{Debug, Formatter};

use geo::{Coord, Point, coord};

use crate::error::GeoError;

pub type Degree = f64;

/// `LonLat`
/// A geographic position, always held as (longitude, latitude).
///
/// Data arrives in both orders. Survey sheets list the northing first,
/// geocoders take `lat, lon` query strings, and `geo` wants `x = lon`.
/// Conversions therefore go through named constructors only, never through
/// an anonymous tuple.
///
/// ```rust
/// use roadmend_geo::LonLat;
/// let ikeja = LonLat::new(3.3515, 6.6018).unwrap();
/// let same = LonLat::from_north_east(6.6018, 3.3515).unwrap();
/// assert_eq!(ikeja, same);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: Degree,
    pub lat: Degree,
}

impl LonLat {
    /// Constructs a validated position from a longitude and a latitude.
    pub fn new(lon: Degree, lat: Degree) -> Result<Self, GeoError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(GeoError::NonFinite);
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Latitude must be within [-90, 90]. Given: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Longitude must be within [-180, 180]. Given: {lon}"
            )));
        }

        Ok(Self::new_unchecked(lon, lat))
    }

    /// Constructs a position from the (north, east) column order used by
    /// surveyed road sheets.
    pub fn from_north_east(north: Degree, east: Degree) -> Result<Self, GeoError> {
        Self::new(east, north)
    }

    pub fn new_unchecked(lon: Degree, lat: Degree) -> Self {
        LonLat { lon, lat }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    pub fn coord(&self) -> Coord {
        coord! { x: self.lon, y: self.lat }
    }
}

impl Debug for LonLat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT({} {})", self.lon, self.lat)
    }
}

impl From<LonLat> for Point {
    fn from(value: LonLat) -> Self {
        value.point()
    }
}

impl From<LonLat> for Coord {
    fn from(value: LonLat) -> Self {
        value.coord()
    }
}

impl TryFrom<Point> for LonLat {
    type Error = GeoError;

    /// Format is: (x = lon, y = lat)
    fn try_from(point: Point) -> Result<Self, Self::Error> {
        LonLat::new(point.x(), point.y())
    }
}

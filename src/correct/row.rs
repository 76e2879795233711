use roadmend_geo::{Attributes, LonLat};

use crate::correct::Reason;

/// One endpoint as surveyed, in the sheet's (north, east) column order.
/// A missing or unreadable cell is `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub north: f64,
    pub east: f64,
}

impl Endpoint {
    pub fn new(north: f64, east: f64) -> Self {
        Endpoint { north, east }
    }

    pub fn missing() -> Self {
        Endpoint::new(f64::NAN, f64::NAN)
    }

    pub fn is_missing(&self) -> bool {
        self.north.is_nan() || self.east.is_nan()
    }

    /// The endpoint as a position, or the reason it cannot be one.
    pub fn lon_lat(&self) -> Result<LonLat, Reason> {
        if self.is_missing() {
            return Err(Reason::MissingCoordinate);
        }

        LonLat::from_north_east(self.north, self.east).map_err(|_| Reason::InvalidCoordinate)
    }
}

impl From<LonLat> for Endpoint {
    fn from(value: LonLat) -> Self {
        Endpoint::new(value.lat, value.lon)
    }
}

/// A road as digitised by hand: two endpoints and whatever else the sheet
/// recorded about it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRecord {
    /// Zero-based position in the source, used to identify the row in logs
    /// and in the corrected output.
    pub row: usize,
    pub start: Endpoint,
    pub end: Endpoint,
    pub attributes: Attributes,
}

impl RoadRecord {
    pub fn new(row: usize, start: impl Into<Endpoint>, end: impl Into<Endpoint>) -> Self {
        RoadRecord {
            row,
            start: start.into(),
            end: end.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

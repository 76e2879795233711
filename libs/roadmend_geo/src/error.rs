use crate::Crs;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("coordinate is missing or not finite")]
    NonFinite,

    #[error("a line needs at least 2 coordinates, got {0}")]
    TooFewCoordinates(usize),

    #[error("unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),

    #[error("coordinate ({x}, {y}) lies outside the domain of {crs}")]
    OutsideProjection { crs: Crs, x: f64, y: f64 },
}

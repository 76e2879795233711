//! Writing geometry sets out for inspection in a map viewer.

pub mod geojson;
pub mod style;

#[cfg(test)]
mod test;

use roadmend_geo::{GeoError, GeometrySet};
use thiserror::Error;

pub use self::geojson::{GeoJsonRenderer, to_collection};
pub use style::Style;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not bring the layer into longitude/latitude: {0}")]
    Geo(#[from] GeoError),

    #[error("could not encode the layer: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write the layer: {0}")]
    Io(#[from] std::io::Error),
}

/// Draws a set as a named, styled layer.
pub trait Render {
    fn render(&mut self, set: &GeometrySet, layer: &str, style: &Style) -> Result<(), RenderError>;
}

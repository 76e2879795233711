//! Readers for the datasets the engines consume.
//!
//! Line datasets come from GeoJSON, either one file (one layer) or a
//! directory of files (one layer each). Surveyed road sheets come from CSV.

pub mod error;
pub mod layer;
pub mod records;

#[cfg(test)]
mod test;

use std::path::Path;

use roadmend_geo::GeometrySet;

pub use error::LoadError;
pub use layer::GeoJsonLoader;
pub use records::{RecordColumns, RoadRecordReader, clean_numeric, clean_numeric_string};

/// Supplies the layers of a line dataset.
pub trait Load {
    /// Reads every layer of `source`, in a stable order.
    fn load(&self, source: &Path) -> Result<Vec<GeometrySet>, LoadError>;
}

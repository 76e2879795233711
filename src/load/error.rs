use std::path::PathBuf;

use roadmend_geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0:?} does not exist")]
    NotFound(PathBuf),

    #[error("could not read {path:?}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("{path:?} is not valid GeoJSON: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("{path:?} declares an unusable coordinate reference system: {error}")]
    Crs { path: PathBuf, error: GeoError },

    #[error("feature {feature} of {path:?} has an invalid line: {error}")]
    Geometry {
        path: PathBuf,
        feature: usize,
        error: GeoError,
    },

    #[error("{0:?} holds no .geojson layers")]
    NoLayers(PathBuf),

    #[error("could not read table {path:?}: {reason}")]
    Table { path: PathBuf, reason: String },

    #[error("table {path:?} has no {column:?} column")]
    MissingColumn { path: PathBuf, column: String },
}

use std::fs;
use std::path::{Path, PathBuf};

use geo::coord;
use geojson::{Feature as GeoJsonFeature, GeoJson, JsonObject, PointType};
use log::{debug, info, warn};
use roadmend_geo::{Attributes, Crs, Feature, GeoError, GeometrySet, LineGeometry, Shape};

use crate::load::{Load, LoadError};

const EXTENSION: &str = "geojson";

/// Reads line layers from GeoJSON.
///
/// A file is a single layer. A directory is a multi-layer source whose
/// layers are its `.geojson` files, ordered by file name. Only `LineString`
/// and `MultiLineString` features are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonLoader;

impl GeoJsonLoader {
    /// Reads a single layer file.
    pub fn load_layer(&self, path: &Path) -> Result<GeometrySet, LoadError> {
        let text = fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        let set = parse_layer(&text, path)?;
        info!(
            "Loaded layer {:?} with {} records ({})",
            path.file_stem().unwrap_or_default(),
            set.len(),
            set.crs()
        );

        Ok(set)
    }

    /// The layer files of a directory source, sorted by name.
    pub fn layer_paths(&self, directory: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let io_error = |error| LoadError::Io {
            path: directory.to_path_buf(),
            error,
        };

        let mut paths = fs::read_dir(directory)
            .map_err(io_error)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error)?;

        paths.retain(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION)
        });
        paths.sort();

        Ok(paths)
    }
}

impl Load for GeoJsonLoader {
    fn load(&self, source: &Path) -> Result<Vec<GeometrySet>, LoadError> {
        if source.is_file() {
            return Ok(vec![self.load_layer(source)?]);
        }

        if !source.is_dir() {
            return Err(LoadError::NotFound(source.to_path_buf()));
        }

        let paths = self.layer_paths(source)?;
        if paths.is_empty() {
            return Err(LoadError::NoLayers(source.to_path_buf()));
        }

        paths.iter().map(|path| self.load_layer(path)).collect()
    }
}

/// Parses one GeoJSON document into a layer. `origin` only labels errors.
pub fn parse_layer(text: &str, origin: &Path) -> Result<GeometrySet, LoadError> {
    let geojson = text.parse::<GeoJson>().map_err(|err| LoadError::Parse {
        path: origin.to_path_buf(),
        reason: err.to_string(),
    })?;

    let (features, foreign_members) = match geojson {
        GeoJson::FeatureCollection(collection) => {
            (collection.features, collection.foreign_members)
        }
        GeoJson::Feature(feature) => (vec![feature], None),
        GeoJson::Geometry(geometry) => (vec![GeoJsonFeature::from(geometry)], None),
    };

    let crs = declared_crs(foreign_members.as_ref())
        .map_err(|error| LoadError::Crs {
            path: origin.to_path_buf(),
            error,
        })?
        .unwrap_or_default();

    let mut set = GeometrySet::new(crs);
    let mut skipped = 0usize;

    for (index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };

        let shape = match shape_of(&geometry.value) {
            Some(shape) => shape.map_err(|error| LoadError::Geometry {
                path: origin.to_path_buf(),
                feature: index,
                error,
            })?,
            None => {
                skipped += 1;
                continue;
            }
        };

        let attributes = feature
            .properties
            .map(|properties| properties.into_iter().collect::<Attributes>())
            .unwrap_or_default();

        set.push(Feature::new(shape, attributes));
    }

    if skipped > 0 {
        warn!("Skipped {skipped} features of {origin:?} without line geometry");
    }

    Ok(set)
}

/// Reads the legacy `crs` member, `{"type": "name", "properties": {"name": ...}}`.
fn declared_crs(members: Option<&JsonObject>) -> Result<Option<Crs>, GeoError> {
    let Some(crs) = members.and_then(|members| members.get("crs")) else {
        return Ok(None);
    };

    match crs.pointer("/properties/name").and_then(|name| name.as_str()) {
        Some(name) => name.parse().map(Some),
        None => {
            debug!("Ignoring crs member without a name: {crs}");
            Ok(None)
        }
    }
}

fn shape_of(value: &geojson::Value) -> Option<Result<Shape, GeoError>> {
    match value {
        geojson::Value::LineString(points) => Some(line_of(points).map(Shape::Line)),
        geojson::Value::MultiLineString(lines) => Some(
            lines
                .iter()
                .map(|points| line_of(points))
                .collect::<Result<Vec<_>, _>>()
                .map(Shape::MultiLine),
        ),
        _ => None,
    }
}

fn line_of(points: &[PointType]) -> Result<LineGeometry, GeoError> {
    LineGeometry::from_coords(points.iter().map(|position| {
        coord! {
            x: position.first().copied().unwrap_or(f64::NAN),
            y: position.get(1).copied().unwrap_or(f64::NAN),
        }
    }))
}

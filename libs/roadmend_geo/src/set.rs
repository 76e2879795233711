use geo::{Coord, Rect, coord};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::error::GeoError;
use crate::project::transform;
use crate::{Crs, LineGeometry, Shape};

/// One attribute row. Insertion order is kept so that rows render and
/// serialise with their source column order.
pub type Attributes = IndexMap<String, Value>;

/// A record: one geometry and its attribute row.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub shape: Shape,
    pub attributes: Attributes,
}

impl Feature {
    pub fn new(shape: impl Into<Shape>, attributes: Attributes) -> Self {
        Feature {
            shape: shape.into(),
            attributes,
        }
    }

    /// Returns the attribute as a string slice, if it is a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// An ordered collection of features under one coordinate reference system.
///
/// Stages never mutate a set they are given; reprojection and decomposition
/// return a new set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySet {
    crs: Crs,
    features: Vec<Feature>,
}

impl GeometrySet {
    pub fn new(crs: Crs) -> Self {
        GeometrySet {
            crs,
            features: Vec::new(),
        }
    }

    pub fn with_features(crs: Crs, features: Vec<Feature>) -> Self {
        GeometrySet { crs, features }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of single-part lines once every record is decomposed.
    pub fn part_count(&self) -> usize {
        self.features.iter().map(|f| f.shape.part_count()).sum()
    }

    /// Splits every multi-part record into one record per part, each keeping a
    /// copy of the originating attributes. Single-part records pass through
    /// unchanged, so decomposing twice is the same as decomposing once.
    pub fn explode(&self) -> GeometrySet {
        let features = self
            .features
            .iter()
            .flat_map(|feature| {
                if feature.shape.part_count() == 0 {
                    debug!("Dropping record without line parts during decomposition");
                }

                feature.shape.parts().iter().map(move |part| Feature {
                    shape: Shape::Line(part.clone()),
                    attributes: feature.attributes.clone(),
                })
            })
            .collect();

        GeometrySet {
            crs: self.crs,
            features,
        }
    }

    /// Produces a copy of the set in the `target` reference system.
    pub fn reproject(&self, target: Crs) -> Result<GeometrySet, GeoError> {
        if self.crs == target {
            return Ok(self.clone());
        }

        let source = self.crs;
        let features = self
            .features
            .iter()
            .map(|feature| {
                Ok(Feature {
                    shape: feature
                        .shape
                        .try_map_coords(|c| transform(c, source, target))?,
                    attributes: feature.attributes.clone(),
                })
            })
            .collect::<Result<Vec<_>, GeoError>>()?;

        Ok(GeometrySet {
            crs: target,
            features,
        })
    }

    /// The bounding rectangle of every coordinate in the set.
    pub fn extent(&self) -> Option<Rect<f64>> {
        let mut coords = self
            .features
            .iter()
            .flat_map(|f| f.shape.parts())
            .flat_map(LineGeometry::coords);

        let first = *coords.next()?;
        let (min, max) = coords.fold((first, first), |(min, max), c| {
            (
                coord! { x: min.x.min(c.x), y: min.y.min(c.y) },
                coord! { x: max.x.max(c.x), y: max.y.max(c.y) },
            )
        });

        Some(Rect::new(min, max))
    }

    /// Centre of the set's extent, in the set's own reference system.
    pub fn center(&self) -> Option<Coord<f64>> {
        self.extent().map(|rect| rect.center())
    }

    /// Appends the features of `other`, which must share this set's system.
    pub fn append(&mut self, other: GeometrySet) -> Result<(), Crs> {
        if other.crs != self.crs {
            return Err(other.crs);
        }

        self.features.extend(other.features);
        Ok(())
    }
}

impl IntoIterator for GeometrySet {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

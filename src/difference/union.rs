use geo::{Intersects, Line, Point};
use rstar::{AABB, RTree, RTreeObject};

use roadmend_geo::{GeometrySet, LineGeometry};

/// One straight segment of a reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSegment {
    pub line: Line<f64>,
}

impl RTreeObject for ReferenceSegment {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.line.start_point(), self.line.end_point())
    }
}

/// The combined geometry of every reference part.
///
/// Only ever asked whether a line intersects it. Segments are indexed so
/// that each candidate segment is tested exactly against the reference
/// segments whose envelope it overlaps.
#[derive(Debug)]
pub struct ReferenceUnion {
    index: RTree<ReferenceSegment>,
}

impl ReferenceUnion {
    pub fn new<'a>(parts: impl IntoIterator<Item = &'a LineGeometry>) -> Self {
        let segments = parts
            .into_iter()
            .flat_map(LineGeometry::segments)
            .map(|line| ReferenceSegment { line })
            .collect::<Vec<_>>();

        ReferenceUnion {
            index: RTree::bulk_load(segments),
        }
    }

    pub fn from_set(set: &GeometrySet) -> Self {
        Self::new(set.iter().flat_map(|feature| feature.shape.parts()))
    }

    /// Number of indexed reference segments.
    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }

    /// Whether `line` shares at least one point with the union.
    /// A shared endpoint is enough.
    pub fn intersects(&self, line: &LineGeometry) -> bool {
        line.segments().any(|segment| {
            let envelope = AABB::from_corners(segment.start_point(), segment.end_point());

            self.index
                .locate_in_envelope_intersecting(&envelope)
                .any(|reference| reference.line.intersects(&segment))
        })
    }
}

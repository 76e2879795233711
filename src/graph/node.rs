use geo::{Distance, Euclidean, Point};
use roadmend_geo::LonLat;
use rstar::{AABB, Envelope};

use crate::graph::NodeId;

/// A network node. The position is stored as a [`Point`] with
/// `x = longitude` and `y = latitude`, which is also the space the
/// spatial index measures nearest-neighbour distance in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
}

impl Node {
    /// Constructs a `Node` from a given `LonLat` and `id`.
    pub fn new(id: NodeId, position: LonLat) -> Self {
        Self {
            id,
            position: position.point(),
        }
    }

    pub fn lon_lat(&self) -> LonLat {
        LonLat::new_unchecked(self.position.x(), self.position.y())
    }
}

impl rstar::PointDistance for Node {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        Euclidean.distance(self.position, *point).powi(2)
    }
}

impl rstar::RTreeObject for Node {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

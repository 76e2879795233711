use roadmend_geo::LonLat;

use crate::graph::{NodeId, RoadNetworkGraph};

/// Trait containing the proximity queries the correction engine needs.
pub trait Scan {
    /// Searches for the node nearest to `position`, measured as planar distance
    /// in (longitude, latitude) space. Returns `None` only for an empty network.
    fn nearest_node(&self, position: LonLat) -> Option<NodeId>;

    /// The position of a node, if the node is known.
    fn node_position(&self, node: NodeId) -> Option<LonLat>;
}

impl Scan for RoadNetworkGraph {
    #[inline]
    fn nearest_node(&self, position: LonLat) -> Option<NodeId> {
        self.index.nearest_neighbor(&position.point()).map(|node| node.id)
    }

    #[inline]
    fn node_position(&self, node: NodeId) -> Option<LonLat> {
        self.hash.get(&node).map(|node| node.lon_lat())
    }
}

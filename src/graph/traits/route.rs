use log::debug;
use petgraph::visit::EdgeRef;
use roadmend_geo::LonLat;

use crate::graph::{NodeId, RoadNetworkGraph, RouteError, Scan, Weight};

pub trait Route {
    /// Finds the cheapest path from `start_node` to `finish_node` by edge weight.
    /// Returns the total weight and the node sequence, both ends included.
    fn route_nodes(
        &self,
        start_node: NodeId,
        finish_node: NodeId,
    ) -> Result<(Weight, Vec<NodeId>), RouteError>;

    /// Snaps both positions to their nearest nodes and routes between them.
    fn route_points(
        &self,
        start: LonLat,
        finish: LonLat,
    ) -> Option<Result<(Weight, Vec<NodeId>), RouteError>>
    where
        Self: Scan,
    {
        let start_node = self.nearest_node(start)?;
        let finish_node = self.nearest_node(finish)?;
        Some(self.route_nodes(start_node, finish_node))
    }
}

impl Route for RoadNetworkGraph {
    fn route_nodes(
        &self,
        start_node: NodeId,
        finish_node: NodeId,
    ) -> Result<(Weight, Vec<NodeId>), RouteError> {
        debug!("Routing {start_node:?} -> {finish_node:?}");

        for node in [start_node, finish_node] {
            if !self.graph.contains_node(node) {
                return Err(RouteError::NodeNotFound(node));
            }
        }

        petgraph::algo::astar(
            &self.graph,
            start_node,
            |finish| finish == finish_node,
            |e| *e.weight(),
            |_| 0 as Weight,
        )
        .ok_or(RouteError::NoPath {
            start: start_node,
            finish: finish_node,
        })
    }
}

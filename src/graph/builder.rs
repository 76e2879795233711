use log::{debug, info};
use roadmend_geo::LonLat;
use rstar::RTree;
use rustc_hash::FxHashMap;

use crate::graph::{GraphStructure, NetworkError, Node, NodeId, RoadNetworkGraph, Weight};

/// Collects nodes and edges, then validates them into a [`RoadNetworkGraph`].
///
/// ```rust
/// use roadmend::graph::RoadNetworkGraph;
/// use roadmend::LonLat;
///
/// let graph = RoadNetworkGraph::builder()
///     .node(1, LonLat::new(0.0, 0.0).unwrap())
///     .node(2, LonLat::new(1.0, 0.0).unwrap())
///     .road(1, 2, 1.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: FxHashMap<NodeId, Node>,
    edges: Vec<(NodeId, NodeId, Weight)>,
}

impl GraphBuilder {
    pub fn add_node(&mut self, id: NodeId, position: LonLat) {
        self.nodes.insert(id, Node::new(id, position));
    }

    /// Adds a one-directional edge.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        self.edges.push((from, to, weight));
    }

    /// Adds an edge in both directions.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: Weight) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    pub fn node(mut self, id: NodeId, position: LonLat) -> Self {
        self.add_node(id, position);
        self
    }

    pub fn edge(mut self, from: NodeId, to: NodeId, weight: Weight) -> Self {
        self.add_edge(from, to, weight);
        self
    }

    pub fn road(mut self, a: NodeId, b: NodeId, weight: Weight) -> Self {
        self.add_road(a, b, weight);
        self
    }

    pub fn build(self) -> Result<RoadNetworkGraph, NetworkError> {
        let mut graph = GraphStructure::new();

        for id in self.nodes.keys() {
            graph.add_node(*id);
        }

        for (from, to, weight) in self.edges {
            if !weight.is_finite() || weight < 0.0 {
                return Err(NetworkError::InvalidWeight { from, to, weight });
            }

            for node in [from, to] {
                if !self.nodes.contains_key(&node) {
                    return Err(NetworkError::UnknownNode { from, to, node });
                }
            }

            // Parallel ways between the same pair keep the cheapest edge.
            match graph.edge_weight(from, to).copied() {
                Some(existing) if existing <= weight => {
                    debug!("Keeping cheaper parallel edge {from} -> {to} ({existing} <= {weight})");
                }
                _ => {
                    graph.add_edge(from, to, weight);
                }
            }
        }

        let index = RTree::bulk_load(self.nodes.values().copied().collect());

        info!(
            "Built network with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(RoadNetworkGraph {
            graph,
            hash: self.nodes,
            index,
        })
    }
}

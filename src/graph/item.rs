use petgraph::prelude::DiGraphMap;
use rstar::RTree;
use rustc_hash::{FxHashMap, FxHasher};

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;

use crate::graph::{GraphBuilder, Node};

pub type NodeId = i64;

/// Path cost of an edge, normally its length in metres.
pub type Weight = f64;

pub type GraphStructure = DiGraphMap<NodeId, Weight, BuildHasherDefault<FxHasher>>;

/// Routing graph for one region.
///
/// Holds the directed edge structure, a position table and an R-tree over
/// node positions for snapping. Built through [`GraphBuilder`] or a
/// [`NetworkProvider`](crate::graph::NetworkProvider), read-only afterwards.
pub struct RoadNetworkGraph {
    pub(crate) graph: GraphStructure,
    pub(crate) hash: FxHashMap<NodeId, Node>,
    pub(crate) index: RTree<Node>,
}

impl Debug for RoadNetworkGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.hash.len(),
            self.graph.edge_count()
        )
    }
}

impl RoadNetworkGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn size(&self) -> usize {
        self.hash.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        self.graph.edge_weight(from, to).copied()
    }
}

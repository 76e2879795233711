use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{NodeId, Weight};

/// Failures while obtaining or assembling a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("no network file for region {region:?}, expected {path:?}")]
    RegionNotFound { region: String, path: PathBuf },

    #[error("could not read network file {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("edge {from} -> {to} references node {node}, which has no position")]
    UnknownNode { from: NodeId, to: NodeId, node: NodeId },

    #[error("edge {from} -> {to} has weight {weight}, weights must be finite and non-negative")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: Weight,
    },
}

/// Why a shortest path could not be produced.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RouteError {
    #[error("node {0} is not part of the network")]
    NodeNotFound(NodeId),

    #[error("no path from {start} to {finish}")]
    NoPath { start: NodeId, finish: NodeId },
}

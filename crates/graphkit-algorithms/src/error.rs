//! Error types for graph algorithms

use crate::common::NodeIndex;
use thiserror::Error;

/// Errors raised by algorithm entry points.
///
/// Node references are dense indices into the `GraphView` the algorithm ran on;
/// resolve them with `GraphView::node`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("Node not found in graph view")]
    NodeNotFound,

    #[error("Graph is not bipartite: edge {0} -> {1} joins two nodes of the same color")]
    NotBipartite(NodeIndex, NodeIndex),

    #[error("Graph does not satisfy the Eulerian condition")]
    NotEulerian,

    #[error("Invalid graph shape: {0}")]
    InvalidGraphShape(&'static str),

    #[error("No heuristic input for node {0}")]
    MissingHeuristicInput(NodeIndex),
}

pub type AlgoResult<T> = Result<T, AlgoError>;

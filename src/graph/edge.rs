//! Edge implementation
//!
//! One tagged edge type for every graph shape: the weight is present exactly
//! when the owning graph is weighted.

use super::types::VertexId;
use serde::{Deserialize, Serialize};

/// A directed arc in an adjacency list
///
/// Undirected graphs store one arc per direction with the same weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex (edge goes FROM this vertex)
    pub source: VertexId,

    /// Target vertex (edge goes TO this vertex)
    pub target: VertexId,

    /// Weight, `None` on unweighted graphs
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId, weight: Option<f64>) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }

    /// Traversal cost: the weight, or 1 for unweighted edges
    pub fn cost(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    /// The same edge pointing the other way
    pub fn reversed(&self) -> Edge {
        Edge {
            source: self.target.clone(),
            target: self.source.clone(),
            weight: self.weight,
        }
    }

    /// Check if this edge goes TO a specific vertex
    pub fn ends_at(&self, vertex: &str) -> bool {
        self.target.as_str() == vertex
    }
}

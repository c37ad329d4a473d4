//! Graph representation
//!
//! - Vertices identified by string labels, kept in insertion order
//! - Directed or undirected, weighted or unweighted edges (no self-loops, no parallel edges)
//! - Optional 2D vertex positions for heuristic search
//! - Lazy breadth-first and depth-first traversal

pub mod edge;
pub mod store;
pub mod traversal;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use store::{GraphError, GraphResult, GraphStore};
pub use traversal::{BreadthFirst, DepthFirst};
pub use types::{Position, VertexId};

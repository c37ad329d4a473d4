//! graphkit
//!
//! An adjacency-list graph with four classic algorithms on top of it:
//! Dijkstra, A*, Hopcroft-Karp maximum bipartite matching, and Hierholzer's
//! Eulerian circuit.
//!
//! # Architecture
//!
//! - [`graph`]: the mutable [`GraphStore`] (vertices in insertion order,
//!   directed or undirected, weighted or unweighted) and lazy traversals.
//! - [`algo`]: entry points that snapshot a store into the dense view of the
//!   `graphkit-algorithms` crate, run an algorithm, and translate the answer
//!   back into [`VertexId`]s. The caller's store is never mutated.
//! - [`config`]: the serializable graph shape.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphkit::{algo, GraphStore};
//!
//! let mut store = GraphStore::with_shape(true, true);
//! for v in ["A", "B", "C", "D"] {
//!     store.add_vertex(v).unwrap();
//! }
//! store.add_weighted_edge("A", "B", 3.0).unwrap();
//! store.add_weighted_edge("A", "C", 6.0).unwrap();
//! store.add_weighted_edge("B", "C", 4.0).unwrap();
//! store.add_weighted_edge("B", "D", 4.0).unwrap();
//! store.add_weighted_edge("C", "D", 8.0).unwrap();
//!
//! let result = algo::shortest_path(&store, "A", "D").unwrap();
//! assert_eq!(result.cost, 7.0);
//! assert_eq!(result.path.unwrap().len(), 3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::GraphConfig;
pub use graph::{
    BreadthFirst, DepthFirst, Edge, GraphError, GraphResult, GraphStore, Position, VertexId,
};

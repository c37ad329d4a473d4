//! Graph algorithms module
//!
//! Algorithms are implemented in the `graphkit-algorithms` crate.
//! This module provides the integration/adapter layer: it snapshots a
//! [`GraphStore`] into a dense [`GraphView`], runs the algorithm on the
//! snapshot, and maps dense indices back to [`VertexId`]s.

use crate::graph::{GraphError, GraphResult, GraphStore, VertexId};
use graphkit_algorithms::{AlgoError, GraphView};
use std::collections::HashMap;
use tracing::debug;

// Re-export algorithm result types
pub use graphkit_algorithms::{Bipartition, MatchingResult, PathResult, SearchStats, Side};

/// Build a GraphView from the store for algorithm execution.
///
/// Dense indices follow vertex insertion order and adjacency order is kept, so
/// every algorithm sees the same ordering the store exposes.
pub fn build_view(store: &GraphStore) -> GraphView<VertexId> {
    // 1. Index mappings
    let index_to_node = store.vertices();
    let node_to_index: HashMap<&str, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.as_str(), idx))
        .collect();

    // 2. Adjacency lists
    let node_count = index_to_node.len();
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut weights: Option<Vec<Vec<f64>>> = store
        .is_weighted()
        .then(|| vec![Vec::new(); node_count]);

    for (u_idx, u) in index_to_node.iter().enumerate() {
        for edge in store.out_edges(u.as_str()) {
            if let Some(&v_idx) = node_to_index.get(edge.target.as_str()) {
                outgoing[u_idx].push(v_idx);
                if let Some(w) = weights.as_mut() {
                    w[u_idx].push(edge.cost());
                }
            }
        }
    }

    GraphView::from_adjacency_list(index_to_node, outgoing, weights, store.is_directed())
}

/// Translate an algorithm error into the store's error vocabulary.
///
/// Endpoints are validated against the store before a view is built, so a
/// `NodeNotFound` here means the snapshot disagrees with the store.
fn map_err(view: &GraphView<VertexId>, err: AlgoError) -> GraphError {
    match err {
        AlgoError::NodeNotFound => {
            GraphError::InvalidGraphShape("vertex missing from graph view".to_string())
        }
        AlgoError::NotBipartite(u, v) => {
            GraphError::NotBipartite(view.node(u).clone(), view.node(v).clone())
        }
        AlgoError::NotEulerian => GraphError::NotEulerian,
        AlgoError::InvalidGraphShape(reason) => GraphError::InvalidGraphShape(reason.to_string()),
        AlgoError::MissingHeuristicInput(idx) => {
            GraphError::MissingHeuristicInput(view.node(idx).clone())
        }
    }
}

fn require_vertex(store: &GraphStore, vertex: &str) -> GraphResult<VertexId> {
    store
        .vertex_key(vertex)
        .cloned()
        .ok_or_else(|| GraphError::VertexNotFound(vertex.into()))
}

/// Dijkstra shortest path from `source` to `target`.
///
/// A target that is not in the graph is reported as unreachable
/// (`path == None`, `cost == f64::INFINITY`).
pub fn shortest_path(
    store: &GraphStore,
    source: impl AsRef<str>,
    target: impl AsRef<str>,
) -> GraphResult<PathResult<VertexId>> {
    let source = require_vertex(store, source.as_ref())?;
    let target = VertexId::new(target.as_ref());

    let view = build_view(store);
    graphkit_algorithms::dijkstra(&view, &source, &target)
        .map_err(|e| map_err(&view, e))
}

/// A* shortest path using the Euclidean distance between vertex positions as
/// the heuristic.
///
/// The heuristic is only optimal-preserving when edge weights are at least
/// the straight-line distance between their endpoints.
pub fn astar_path(
    store: &GraphStore,
    source: impl AsRef<str>,
    target: impl AsRef<str>,
) -> GraphResult<PathResult<VertexId>> {
    let source = require_vertex(store, source.as_ref())?;
    let target = require_vertex(store, target.as_ref())?;
    let goal = store
        .position(&target)
        .ok_or_else(|| GraphError::MissingHeuristicInput(target.clone()))?;

    let view = build_view(store);
    let heuristic = |v: &VertexId| store.position(v).map(|p| p.distance_to(&goal));
    graphkit_algorithms::astar(&view, &source, &target, heuristic)
        .map_err(|e| map_err(&view, e))
}

/// Two-coloring of an undirected graph
pub fn bipartition(store: &GraphStore) -> GraphResult<Bipartition<VertexId>> {
    let view = build_view(store);
    graphkit_algorithms::bipartition(&view).map_err(|e| map_err(&view, e))
}

/// Maximum cardinality matching (Hopcroft-Karp) of an undirected bipartite graph.
///
/// Pairs are `(u, v)` with `u` on the left side (color 0), in left-side
/// insertion order.
pub fn maximum_matching(store: &GraphStore) -> GraphResult<MatchingResult<VertexId>> {
    let view = build_view(store);
    let result = graphkit_algorithms::hopcroft_karp(&view)
        .map_err(|e| map_err(&view, e))?;
    debug!(
        "maximum matching over {} vertices: {} pairs",
        store.vertex_count(),
        result.size()
    );
    Ok(result)
}

/// Whether the graph has an Eulerian circuit.
///
/// Stricter than the bare degree condition (in-degree equals out-degree when
/// directed, every degree even when undirected): all vertices that touch an
/// edge must also lie in one weakly connected component. Two disjoint cycles
/// have balanced degrees but no single circuit, so they are rejected here.
/// Isolated vertices are ignored and an edgeless graph qualifies.
pub fn is_eulerian(store: &GraphStore) -> bool {
    graphkit_algorithms::is_eulerian(&build_view(store))
}

/// Eulerian circuit via Hierholzer's algorithm.
///
/// Returns a closed walk using every edge exactly once, starting at the first
/// vertex (insertion order) that has an edge. An edgeless graph yields an
/// empty circuit.
pub fn eulerian_circuit(store: &GraphStore) -> GraphResult<Vec<VertexId>> {
    let view = build_view(store);
    graphkit_algorithms::eulerian_circuit(&view)
        .map_err(|e| map_err(&view, e))
}

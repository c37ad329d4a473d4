//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.
//! Every algorithm in this crate works against a `GraphView` snapshot, so callers
//! keep ownership of their own mutable graph representation.

use std::collections::HashMap;
use std::hash::Hash;

/// Dense node index (position of a node in `GraphView::index_to_node`)
pub type NodeIndex = usize;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// `N` is the caller's node identifier. Indices follow the order in which nodes were
/// handed to the constructor, which keeps every algorithm deterministic for a fixed
/// insertion order.
#[derive(Debug, Clone)]
pub struct GraphView<N> {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to the node identifier
    pub index_to_node: Vec<N>,
    /// Mapping from node identifier to dense index
    pub node_to_index: HashMap<N, NodeIndex>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<NodeIndex>,

    /// Number of arcs arriving at each node
    pub in_degrees: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,

    /// Position of each node in the natural ordering of identifiers.
    /// Priority queues break key ties on this rank.
    pub rank: Vec<usize>,

    /// Whether arcs are one-way. Undirected views store both arcs of every edge.
    pub directed: bool,
}

impl<N> GraphView<N>
where
    N: Clone + Eq + Hash + Ord,
{
    /// Build a view from per-node adjacency lists.
    ///
    /// `outgoing[i]` holds the target indices of node `i`, and `weights[i]` (when
    /// present) the matching weights. In-degrees and tie-break ranks are derived.
    pub fn from_adjacency_list(
        index_to_node: Vec<N>,
        outgoing: Vec<Vec<NodeIndex>>,
        weights: Option<Vec<Vec<f64>>>,
        directed: bool,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index: HashMap<N, NodeIndex> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.clone(), idx))
            .collect();

        let mut in_degrees = vec![0; node_count];
        for &v in outgoing.iter().flatten() {
            in_degrees[v] += 1;
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut flat_weights = if weights.is_some() { Some(Vec::new()) } else { None };

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());

            if let Some(ref mut w_flat) = flat_weights {
                if let Some(w_row) = weights.as_ref().map(|w| &w[i]) {
                    w_flat.extend(w_row.iter());
                }
            }
        }


        let mut by_identifier: Vec<NodeIndex> = (0..node_count).collect();
        by_identifier.sort_by(|&a, &b| index_to_node[a].cmp(&index_to_node[b]));
        let mut rank = vec![0; node_count];
        for (position, idx) in by_identifier.into_iter().enumerate() {
            rank[idx] = position;
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_degrees,
            weights: flat_weights,
            rank,
            directed,
        }
    }

    /// Resolve a node identifier to its dense index
    pub fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.node_to_index.get(node).copied()
    }
}

impl<N> GraphView<N> {
    /// Identifier of the node at `idx`
    pub fn node(&self, idx: NodeIndex) -> &N {
        &self.index_to_node[idx]
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.in_degrees[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: NodeIndex) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Outgoing `(target, cost)` pairs. Unweighted views cost 1 per edge.
    pub fn out_edges(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        let weights = self.weights(idx);
        self.successors(idx)
            .iter()
            .enumerate()
            .map(move |(i, &target)| (target, weights.map_or(1.0, |w| w[i])))
    }

    /// Total number of stored arcs
    pub fn arc_count(&self) -> usize {
        self.out_targets.len()
    }
}

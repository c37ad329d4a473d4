//! Bipartite matching
//!
//! Two-coloring bipartition followed by Hopcroft-Karp maximum cardinality
//! matching in O(E * sqrt(V)).

use super::common::{GraphView, NodeIndex};
use super::error::{AlgoError, AlgoResult};
use std::collections::VecDeque;
use tracing::{debug, trace};

const INF: usize = usize::MAX;

/// Side of a node in a bipartition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

/// The two color classes of a bipartite graph, in node insertion order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bipartition<N> {
    pub left: Vec<N>,
    pub right: Vec<N>,
}

/// Result of the matching algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchingResult<N> {
    /// Matched `(left, right)` pairs, ordered by the left node's insertion order
    pub pairs: Vec<(N, N)>,
    /// Number of layering phases that found at least one augmenting path
    pub phases: usize,
}

impl<N> MatchingResult<N> {
    pub fn size(&self) -> usize {
        self.pairs.len()
    }
}

fn require_undirected<N>(view: &GraphView<N>) -> AlgoResult<()> {
    if view.directed {
        return Err(AlgoError::InvalidGraphShape("bipartite matching requires an undirected graph"));
    }
    Ok(())
}

/// Color every node by BFS, starting a new component at each uncolored node.
fn two_color<N>(view: &GraphView<N>) -> AlgoResult<Vec<Side>> {
    let mut color: Vec<Option<Side>> = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    for start in 0..view.node_count {
        if color[start].is_some() {
            continue;
        }
        color[start] = Some(Side::Left);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let side = color[u];
            for &v in view.successors(u) {
                match color[v] {
                    None => {
                        color[v] = match side {
                            Some(Side::Left) => Some(Side::Right),
                            _ => Some(Side::Left),
                        };
                        queue.push_back(v);
                    }
                    Some(c) if Some(c) == side => return Err(AlgoError::NotBipartite(u, v)),
                    Some(_) => {}
                }
            }
        }
    }

    Ok(color.into_iter().map(|c| c.unwrap_or(Side::Left)).collect())
}

/// Split an undirected graph into its two color classes.
///
/// Fails with `NotBipartite` when an edge joins two nodes of the same color.
pub fn bipartition<N: Clone>(view: &GraphView<N>) -> AlgoResult<Bipartition<N>> {
    require_undirected(view)?;
    let sides = two_color(view)?;

    let mut result = Bipartition {
        left: Vec::new(),
        right: Vec::new(),
    };
    for (idx, side) in sides.into_iter().enumerate() {
        match side {
            Side::Left => result.left.push(view.node(idx).clone()),
            Side::Right => result.right.push(view.node(idx).clone()),
        }
    }
    Ok(result)
}

/// Hopcroft-Karp working state. `pair_u` is indexed by left nodes, `pair_v` by
/// right nodes; both are sized to the whole view for direct indexing.
struct HopcroftKarp<'a, N> {
    view: &'a GraphView<N>,
    left: Vec<NodeIndex>,
    pair_u: Vec<Option<NodeIndex>>,
    pair_v: Vec<Option<NodeIndex>>,
    dist: Vec<usize>,
}

impl<'a, N> HopcroftKarp<'a, N> {
    fn new(view: &'a GraphView<N>, left: Vec<NodeIndex>) -> Self {
        let n = view.node_count;
        HopcroftKarp {
            view,
            left,
            pair_u: vec![None; n],
            pair_v: vec![None; n],
            dist: vec![INF; n],
        }
    }

    /// Layering BFS from every free left node through matched edges.
    /// Returns whether a free right node is reachable.
    fn layer(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for &u in &self.left {
            if self.pair_u[u].is_none() {
                self.dist[u] = 0;
                queue.push_back(u);
            } else {
                self.dist[u] = INF;
            }
        }

        let mut free_dist = INF;
        while let Some(u) = queue.pop_front() {
            if self.dist[u] >= free_dist {
                continue;
            }
            for &v in self.view.successors(u) {
                match self.pair_v[v] {
                    None => {
                        if free_dist == INF {
                            free_dist = self.dist[u] + 1;
                        }
                    }
                    Some(w) if self.dist[w] == INF => {
                        self.dist[w] = self.dist[u] + 1;
                        queue.push_back(w);
                    }
                    Some(_) => {}
                }
            }
        }

        trace!("hopcroft-karp layering: free distance {}", free_dist);
        free_dist != INF
    }

    /// Layer-respecting augmenting search from the free left node `root`.
    ///
    /// Explicit stack of `(left node, next successor position)` frames. On
    /// reaching a free right node every frame's last tried edge is flipped into
    /// the matching; a node whose successors are exhausted is retired for the
    /// rest of the phase by setting its distance to infinity.
    fn augment(&mut self, root: NodeIndex) -> bool {
        let mut stack: Vec<(NodeIndex, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let u = frame.0;
            let successors = self.view.successors(u);
            if frame.1 == successors.len() {
                self.dist[u] = INF;
                stack.pop();
                continue;
            }
            let v = successors[frame.1];
            frame.1 += 1;

            match self.pair_v[v] {
                None => {
                    for &(w, next) in &stack {
                        let x = self.view.successors(w)[next - 1];
                        self.pair_u[w] = Some(x);
                        self.pair_v[x] = Some(w);
                    }
                    return true;
                }
                Some(w) if self.dist[w] == self.dist[u].saturating_add(1) => {
                    stack.push((w, 0));
                }
                Some(_) => {}
            }
        }

        false
    }

    fn run(&mut self) -> usize {
        let mut phases = 0;
        let mut matched = 0;
        while self.layer() {
            phases += 1;
            for i in 0..self.left.len() {
                let u = self.left[i];
                if self.pair_u[u].is_none() && self.augment(u) {
                    matched += 1;
                }
            }
            trace!("hopcroft-karp phase {}: matching size {}", phases, matched);
        }
        phases
    }
}

/// Hopcroft-Karp maximum cardinality matching on an undirected bipartite graph.
pub fn hopcroft_karp<N: Clone>(view: &GraphView<N>) -> AlgoResult<MatchingResult<N>> {
    require_undirected(view)?;
    let sides = two_color(view)?;
    let left: Vec<NodeIndex> = (0..view.node_count)
        .filter(|&idx| sides[idx] == Side::Left)
        .collect();

    let mut hk = HopcroftKarp::new(view, left);
    let phases = hk.run();

    let pairs: Vec<(N, N)> = hk
        .left
        .iter()
        .filter_map(|&u| hk.pair_u[u].map(|v| (view.node(u).clone(), view.node(v).clone())))
        .collect();

    debug!("hopcroft-karp: {} pairs in {} phases", pairs.len(), phases);
    Ok(MatchingResult { pairs, phases })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Undirected view from an edge list; both arcs are stored.
    fn undirected(nodes: Vec<u64>, edges: &[(usize, usize)]) -> GraphView<u64> {
        let mut outgoing = vec![Vec::new(); nodes.len()];
        for &(u, v) in edges {
            outgoing[u].push(v);
            outgoing[v].push(u);
        }
        GraphView::from_adjacency_list(nodes, outgoing, None, false)
    }

    #[test]
    fn test_bipartition() {
        // 1-2, 1-4, 3-2
        let view = undirected(vec![1, 2, 3, 4], &[(0, 1), (0, 3), (2, 1)]);
        let parts = bipartition(&view).unwrap();
        assert_eq!(parts.left, vec![1, 3]);
        assert_eq!(parts.right, vec![2, 4]);
    }

    #[test]
    fn test_odd_cycle_is_not_bipartite() {
        let view = undirected(vec![1, 2, 3], &[(0, 1), (1, 2), (2, 0)]);
        assert!(matches!(bipartition(&view), Err(AlgoError::NotBipartite(_, _))));
        assert!(matches!(hopcroft_karp(&view), Err(AlgoError::NotBipartite(_, _))));
    }

    #[test]
    fn test_directed_view_rejected() {
        let view = GraphView::from_adjacency_list(vec![1u64, 2], vec![vec![1], vec![]], None, true);
        assert!(matches!(hopcroft_karp(&view), Err(AlgoError::InvalidGraphShape(_))));
    }

    #[test]
    fn test_small_matching() {
        let view = undirected(vec![1, 2, 3, 4], &[(0, 1), (0, 3), (2, 1)]);
        let result = hopcroft_karp(&view).unwrap();
        assert_eq!(result.size(), 2);
        assert_eq!(result.pairs, vec![(1, 4), (3, 2)]);
    }

    #[test]
    fn test_needs_augmenting_path() {
        // Left 0,2,4 / right 1,3,5. Greedy 0-1 must be rerouted to 0-3.
        // 0-1, 0-3, 2-1, 4-3, 4-5
        let view = undirected(vec![0, 1, 2, 3, 4, 5], &[(0, 1), (0, 3), (2, 1), (4, 3), (4, 5)]);
        let result = hopcroft_karp(&view).unwrap();
        assert_eq!(result.size(), 3);

        let mut seen = std::collections::HashSet::new();
        for (u, v) in &result.pairs {
            assert!(seen.insert(*u));
            assert!(seen.insert(*v));
        }
    }

    #[test]
    fn test_chain_requires_long_augmentation() {
        // Path 0-1-2-3-4-5: perfect matching of size 3 reachable only by
        // augmenting through matched edges.
        let view = undirected(vec![0, 1, 2, 3, 4, 5], &[(1, 2), (0, 1), (3, 4), (2, 3), (4, 5)]);
        let result = hopcroft_karp(&view).unwrap();
        assert_eq!(result.size(), 3);
        assert!(result.phases >= 1);
    }

    #[test]
    fn test_isolated_nodes_and_empty_graph() {
        let view = undirected(vec![7, 8, 9], &[]);
        let result = hopcroft_karp(&view).unwrap();
        assert_eq!(result.size(), 0);
        assert_eq!(result.phases, 0);

        let empty = undirected(vec![], &[]);
        assert_eq!(hopcroft_karp(&empty).unwrap().size(), 0);
    }
}

//! Pathfinding algorithms
//!
//! Dijkstra and A* share one best-first relaxation loop over a lazy-deletion
//! binary heap: stale entries are skipped when popped instead of being
//! decreased in place.

use super::common::{GraphView, NodeIndex};
use super::error::{AlgoError, AlgoResult};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use tracing::debug;

/// Work counters collected during a search.
///
/// Used to compare algorithms against each other; they carry no correctness meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Edge relaxation attempts (one per outgoing edge examined)
    pub relaxations: usize,
    /// Entries pushed onto the priority queue
    pub pushes: usize,
    /// Entries popped from the priority queue, stale ones included
    pub pops: usize,
}

/// Result of a pathfinding algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult<N> {
    pub source: N,
    pub target: N,
    /// Vertices from source to target inclusive; `None` when the target is unreachable
    pub path: Option<Vec<N>>,
    /// Total path cost; `f64::INFINITY` when the target is unreachable
    pub cost: f64,
    pub stats: SearchStats,
}

impl<N> PathResult<N> {
    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }
}

/// State for the priority queue
#[derive(Copy, Clone, Debug)]
struct State {
    /// Priority key: `g` for Dijkstra, `g + h` for A*
    key: f64,
    /// Accumulated path cost when the entry was pushed
    cost: f64,
    /// Tie-break rank of the node identifier
    rank: usize,
    node_idx: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare keys reversed for min-heap, then the smaller identifier first
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of the shared search loop, in dense indices
struct Search {
    path: Option<Vec<NodeIndex>>,
    cost: f64,
    stats: SearchStats,
}

/// Best-first search shared by Dijkstra and A*.
///
/// Arcs with a negative weight are skipped, so the search always terminates.
/// With `finalize` set, a popped node is closed and never pushed again, which is
/// the A* formulation and requires a consistent heuristic.
fn best_first<N, H>(
    view: &GraphView<N>,
    source: NodeIndex,
    target: Option<NodeIndex>,
    mut heuristic: H,
    finalize: bool,
) -> AlgoResult<Search>
where
    H: FnMut(NodeIndex) -> AlgoResult<f64>,
{
    let n = view.node_count;
    let mut stats = SearchStats::default();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        key: heuristic(source)?,
        cost: 0.0,
        rank: view.rank[source],
        node_idx: source,
    });
    stats.pushes += 1;

    while let Some(State { cost, node_idx, .. }) = heap.pop() {
        stats.pops += 1;

        if closed[node_idx] || cost > dist[node_idx] {
            continue;
        }

        if Some(node_idx) == target {
            let mut path = vec![node_idx];
            let mut curr = node_idx;
            while let Some(prev) = parent[curr] {
                path.push(prev);
                curr = prev;
            }
            path.reverse();
            return Ok(Search {
                path: Some(path),
                cost: dist[node_idx],
                stats,
            });
        }

        if finalize {
            closed[node_idx] = true;
        }

        for (next_idx, weight) in view.out_edges(node_idx) {
            // Negative arcs are never relaxed
            if weight < 0.0 {
                continue;
            }
            stats.relaxations += 1;
            let next_cost = cost + weight;

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(node_idx);
                if !closed[next_idx] {
                    heap.push(State {
                        key: next_cost + heuristic(next_idx)?,
                        cost: next_cost,
                        rank: view.rank[next_idx],
                        node_idx: next_idx,
                    });
                    stats.pushes += 1;
                }
            }
        }
    }

    Ok(Search {
        path: None,
        cost: f64::INFINITY,
        stats,
    })
}

fn into_result<N: Clone>(view: &GraphView<N>, source: &N, target: &N, search: Search) -> PathResult<N> {
    PathResult {
        source: source.clone(),
        target: target.clone(),
        path: search
            .path
            .map(|p| p.into_iter().map(|idx| view.node(idx).clone()).collect()),
        cost: search.cost,
        stats: search.stats,
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from the view if available, otherwise assumes 1.0.
/// A target that is not part of the view is treated as unreachable.
/// Negative-weight arcs are ignored.
/// Complexity O((V+E) log E).
pub fn dijkstra<N>(view: &GraphView<N>, source: &N, target: &N) -> AlgoResult<PathResult<N>>
where
    N: Clone + Eq + Hash + Ord,
{
    let source_idx = view.index_of(source).ok_or(AlgoError::NodeNotFound)?;
    let target_idx = view.index_of(target);

    let search = best_first(view, source_idx, target_idx, |_| Ok(0.0), false)?;
    debug!(
        "dijkstra: reachable={} cost={} relaxations={} pushes={} pops={}",
        search.path.is_some(),
        search.cost,
        search.stats.relaxations,
        search.stats.pushes,
        search.stats.pops
    );
    Ok(into_result(view, source, target, search))
}

/// A* search guided by `heuristic`.
///
/// `heuristic(node)` estimates the remaining cost from `node` to `target` and
/// must be admissible and consistent for the returned path to be optimal.
/// Returning `None` aborts the search with `MissingHeuristicInput`.
pub fn astar<N, H>(
    view: &GraphView<N>,
    source: &N,
    target: &N,
    mut heuristic: H,
) -> AlgoResult<PathResult<N>>
where
    N: Clone + Eq + Hash + Ord,
    H: FnMut(&N) -> Option<f64>,
{
    let source_idx = view.index_of(source).ok_or(AlgoError::NodeNotFound)?;
    let target_idx = view.index_of(target).ok_or(AlgoError::NodeNotFound)?;

    let estimate = |idx: NodeIndex| {
        heuristic(view.node(idx)).ok_or(AlgoError::MissingHeuristicInput(idx))
    };
    let search = best_first(view, source_idx, Some(target_idx), estimate, true)?;
    debug!(
        "astar: reachable={} cost={} relaxations={} pushes={} pops={}",
        search.path.is_some(),
        search.cost,
        search.stats.relaxations,
        search.stats.pushes,
        search.stats.pops
    );
    Ok(into_result(view, source, target, search))
}

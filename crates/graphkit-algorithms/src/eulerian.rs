//! Eulerian circuits
//!
//! Degree/connectivity test plus an iterative Hierholzer circuit extraction.

use super::common::{GraphView, NodeIndex};
use super::error::{AlgoError, AlgoResult};
use std::collections::HashMap;
use tracing::debug;

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut curr = i;
        while self.parent[curr] != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

fn degrees_balanced<N>(view: &GraphView<N>) -> bool {
    if view.directed {
        (0..view.node_count).all(|u| view.in_degree(u) == view.out_degree(u))
    } else {
        // Undirected views hold both arcs, so out-degree is the degree
        (0..view.node_count).all(|u| view.out_degree(u) % 2 == 0)
    }
}

/// All nodes that touch an edge lie in one weakly connected component.
fn edges_connected<N>(view: &GraphView<N>) -> bool {
    let mut uf = UnionFind::new(view.node_count);
    for u in 0..view.node_count {
        for &v in view.successors(u) {
            uf.union(u, v);
        }
    }

    let mut component = None;
    for u in (0..view.node_count).filter(|&u| view.out_degree(u) + view.in_degree(u) > 0) {
        let root = uf.find(u);
        match component {
            None => component = Some(root),
            Some(c) if c != root => return false,
            Some(_) => {}
        }
    }
    true
}

/// Whether the graph has an Eulerian circuit.
///
/// Directed: in-degree equals out-degree everywhere. Undirected: every degree
/// is even. On top of that degree condition the edges must form a single
/// connected piece, so balanced but disconnected graphs are rejected;
/// isolated nodes are ignored and an edgeless graph qualifies.
pub fn is_eulerian<N>(view: &GraphView<N>) -> bool {
    degrees_balanced(view) && edges_connected(view)
}

/// For every arc position in the CSR, the position of its reverse arc.
fn mirror_arcs<N>(view: &GraphView<N>) -> AlgoResult<Vec<usize>> {
    let mut position: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::with_capacity(view.arc_count());
    for u in 0..view.node_count {
        for pos in view.out_offsets[u]..view.out_offsets[u + 1] {
            position.insert((u, view.out_targets[pos]), pos);
        }
    }

    let mut mirror = vec![0; view.arc_count()];
    for u in 0..view.node_count {
        for pos in view.out_offsets[u]..view.out_offsets[u + 1] {
            let v = view.out_targets[pos];
            mirror[pos] = *position
                .get(&(v, u))
                .ok_or(AlgoError::InvalidGraphShape("undirected edge without a mirrored arc"))?;
        }
    }
    Ok(mirror)
}

/// Hierholzer's algorithm (iterative).
///
/// Works on a private copy of the adjacency: a per-node cursor into the CSR and
/// a consumed flag per arc. Consuming an undirected edge also consumes its
/// mirrored arc. The walk starts at the first node (insertion order) with an
/// outgoing edge and returns to it. An edgeless graph yields an empty circuit.
pub fn eulerian_circuit<N: Clone>(view: &GraphView<N>) -> AlgoResult<Vec<N>> {
    if !is_eulerian(view) {
        return Err(AlgoError::NotEulerian);
    }

    let Some(start) = (0..view.node_count).find(|&u| view.out_degree(u) > 0) else {
        return Ok(Vec::new());
    };

    let mirror = if view.directed { None } else { Some(mirror_arcs(view)?) };
    let mut used = vec![false; view.arc_count()];
    let mut cursor: Vec<usize> = view.out_offsets[..view.node_count].to_vec();

    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(view.arc_count() + 1);

    while let Some(&u) = stack.last() {
        let end = view.out_offsets[u + 1];
        while cursor[u] < end && used[cursor[u]] {
            cursor[u] += 1;
        }

        if cursor[u] < end {
            let pos = cursor[u];
            used[pos] = true;
            if let Some(mirror) = &mirror {
                used[mirror[pos]] = true;
            }
            stack.push(view.out_targets[pos]);
        } else {
            circuit.push(u);
            stack.pop();
        }
    }

    circuit.reverse();
    debug!("hierholzer: circuit of {} edges", circuit.len().saturating_sub(1));
    Ok(circuit.into_iter().map(|idx| view.node(idx).clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(nodes: Vec<&'static str>, edges: &[(usize, usize)], directed: bool) -> GraphView<&'static str> {
        let mut outgoing = vec![Vec::new(); nodes.len()];
        for &(u, v) in edges {
            outgoing[u].push(v);
            if !directed {
                outgoing[v].push(u);
            }
        }
        GraphView::from_adjacency_list(nodes, outgoing, None, directed)
    }

    #[test]
    fn test_undirected_triangle() {
        let view = build(vec!["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)], false);
        assert!(is_eulerian(&view));
        let circuit = eulerian_circuit(&view).unwrap();
        assert_eq!(circuit, vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_directed_cycle_with_detour() {
        // A->B->C->A plus B->D->B
        let view = build(
            vec!["A", "B", "C", "D"],
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 1)],
            true,
        );
        assert!(is_eulerian(&view));
        let circuit = eulerian_circuit(&view).unwrap();
        assert_eq!(circuit.len(), 6);
        assert_eq!(circuit.first(), circuit.last());
        assert_eq!(circuit, vec!["A", "B", "D", "B", "C", "A"]);
    }

    #[test]
    fn test_bowtie_undirected() {
        // Two triangles sharing C: A-B-C-A, C-D-E-C
        let view = build(
            vec!["A", "B", "C", "D", "E"],
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)],
            false,
        );
        let circuit = eulerian_circuit(&view).unwrap();
        assert_eq!(circuit.len(), 7);
        assert_eq!(circuit[0], "A");
        assert_eq!(circuit[6], "A");
    }

    #[test]
    fn test_odd_degree_rejected() {
        let view = build(vec!["A", "B", "C"], &[(0, 1), (1, 2)], false);
        assert!(!is_eulerian(&view));
        assert_eq!(eulerian_circuit(&view).unwrap_err(), AlgoError::NotEulerian);
    }

    #[test]
    fn test_unbalanced_directed_rejected() {
        let view = build(vec!["A", "B"], &[(0, 1)], true);
        assert!(!is_eulerian(&view));
    }

    #[test]
    fn test_disconnected_cycles_rejected() {
        let view = build(
            vec!["A", "B", "C", "D", "E", "F"],
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)],
            false,
        );
        assert!(!is_eulerian(&view));
    }

    #[test]
    fn test_edgeless_graph() {
        let view = build(vec!["A", "B"], &[], false);
        assert!(is_eulerian(&view));
        assert!(eulerian_circuit(&view).unwrap().is_empty());
    }

    #[test]
    fn test_isolated_node_ignored() {
        let view = build(vec!["Z", "A", "B", "C"], &[(1, 2), (2, 3), (3, 1)], true);
        let circuit = eulerian_circuit(&view).unwrap();
        assert_eq!(circuit, vec!["A", "B", "C", "A"]);
    }
}

//! Lazy breadth-first and depth-first traversal over a [`GraphStore`]
//!
//! Both iterators borrow the store for their whole lifetime, so the graph
//! cannot change underneath a traversal.

use super::store::{GraphError, GraphResult, GraphStore};
use super::types::VertexId;
use std::collections::{HashSet, VecDeque};

/// Breadth-first traversal yielding `(vertex, distance from start)`
///
/// Vertices are marked when enqueued, so each reachable vertex is produced
/// exactly once, in layer order.
#[derive(Debug)]
pub struct BreadthFirst<'a> {
    store: &'a GraphStore,
    queue: VecDeque<(&'a VertexId, usize)>,
    visited: HashSet<&'a str>,
}

impl<'a> BreadthFirst<'a> {
    pub(crate) fn new(store: &'a GraphStore, start: &str) -> GraphResult<Self> {
        let start = store
            .vertex_key(start)
            .ok_or_else(|| GraphError::VertexNotFound(start.into()))?;

        let mut visited = HashSet::new();
        visited.insert(start.as_str());
        Ok(BreadthFirst {
            store,
            queue: VecDeque::from([(start, 0)]),
            visited,
        })
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (VertexId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let (current, dist) = self.queue.pop_front()?;

        for edge in store.out_edges(current.as_str()) {
            if self.visited.insert(edge.target.as_str()) {
                self.queue.push_back((&edge.target, dist + 1));
            }
        }
        Some((current.clone(), dist))
    }
}

/// Depth-first traversal yielding `(vertex, depth)`
///
/// Explicit stack: the most recently pushed neighbour is explored first, and
/// the depth is the one recorded when the vertex was pushed. A vertex pushed
/// more than once is produced only on its first pop.
#[derive(Debug)]
pub struct DepthFirst<'a> {
    store: &'a GraphStore,
    stack: Vec<(&'a VertexId, usize)>,
    visited: HashSet<&'a str>,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(store: &'a GraphStore, start: &str) -> GraphResult<Self> {
        let start = store
            .vertex_key(start)
            .ok_or_else(|| GraphError::VertexNotFound(start.into()))?;

        Ok(DepthFirst {
            store,
            stack: vec![(start, 0)],
            visited: HashSet::new(),
        })
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (VertexId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        while let Some((current, depth)) = self.stack.pop() {
            if !self.visited.insert(current.as_str()) {
                continue;
            }

            for edge in store.out_edges(current.as_str()) {
                if !self.visited.contains(edge.target.as_str()) {
                    self.stack.push((&edge.target, depth + 1));
                }
            }
            return Some((current.clone(), depth));
        }
        None
    }
}

impl GraphStore {
    /// Breadth-first traversal from `start`
    pub fn breadth_first(&self, start: impl AsRef<str>) -> GraphResult<BreadthFirst<'_>> {
        BreadthFirst::new(self, start.as_ref())
    }

    /// Depth-first traversal from `start`
    pub fn depth_first(&self, start: impl AsRef<str>) -> GraphResult<DepthFirst<'_>> {
        DepthFirst::new(self, start.as_ref())
    }
}

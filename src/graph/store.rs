//! In-memory graph storage implementation
//!
//! Adjacency lists keyed by vertex in insertion order, plus optional vertex
//! positions used as A* heuristic input.

use super::edge::Edge;
use super::types::{Position, VertexId};
use crate::config::GraphConfig;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge {0} -> {1} not found")]
    EdgeNotFound(VertexId, VertexId),

    #[error("Vertex {0} already exists")]
    DuplicateVertex(VertexId),

    #[error("Edge {0} -> {1} already exists")]
    DuplicateEdge(VertexId, VertexId),

    #[error("Self-loop on vertex {0} is not allowed")]
    SelfLoop(VertexId),

    #[error("Graph is not weighted")]
    NotWeighted,

    #[error("Graph is not bipartite: edge {0} - {1} joins two vertices of the same color")]
    NotBipartite(VertexId, VertexId),

    #[error("Graph does not satisfy the Eulerian condition")]
    NotEulerian,

    #[error("Invalid graph shape: {0}")]
    InvalidGraphShape(String),

    #[error("No position for vertex {0}")]
    MissingHeuristicInput(VertexId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - adjacency: VertexId -> Vec<Edge> (outgoing edges, insertion order)
/// - positions: VertexId -> Position (heuristic input only)
///
/// Undirected graphs keep every edge in both adjacency lists with the same
/// weight. No adjacency list holds two edges to the same target.
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Outgoing edges per vertex; key order is vertex insertion order
    adjacency: IndexMap<VertexId, Vec<Edge>>,

    /// Vertex coordinates
    positions: HashMap<VertexId, Position>,

    directed: bool,

    weighted: bool,
}

impl GraphStore {
    /// Create a new empty graph store (directed, unweighted)
    pub fn new() -> Self {
        Self::from_config(&GraphConfig::default())
    }

    /// Create an empty graph with the given shape
    pub fn with_shape(directed: bool, weighted: bool) -> Self {
        GraphStore {
            adjacency: IndexMap::new(),
            positions: HashMap::new(),
            directed,
            weighted,
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::with_shape(config.directed, config.weighted)
    }

    /// Current shape as a config value
    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            directed: self.directed,
            weighted: self.weighted,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    fn lookup(&self, vertex: &str) -> GraphResult<&Vec<Edge>> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::VertexNotFound(vertex.into()))
    }

    fn lookup_mut(&mut self, vertex: &str) -> GraphResult<&mut Vec<Edge>> {
        self.adjacency
            .get_mut(vertex)
            .ok_or_else(|| GraphError::VertexNotFound(vertex.into()))
    }

    /// The stored key for `vertex`, borrowed from the store
    pub(crate) fn vertex_key(&self, vertex: &str) -> Option<&VertexId> {
        self.adjacency.get_key_value(vertex).map(|(k, _)| k)
    }

    /// Outgoing edges without copying; empty for unknown vertices
    pub(crate) fn out_edges(&self, vertex: &str) -> &[Edge] {
        self.adjacency.get(vertex).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Add an isolated vertex
    pub fn add_vertex(&mut self, id: impl Into<VertexId>) -> GraphResult<()> {
        let id = id.into();
        if self.adjacency.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        debug!("Added vertex {}", id);
        self.adjacency.insert(id, Vec::new());
        Ok(())
    }

    /// Add an edge. On weighted graphs it gets weight 0.
    pub fn add_edge(&mut self, source: impl Into<VertexId>, target: impl Into<VertexId>) -> GraphResult<()> {
        self.add_weighted_edge(source, target, 0.0)
    }

    /// Add an edge with a weight. The weight is dropped on unweighted graphs.
    ///
    /// Undirected graphs also receive the mirrored edge unless it already exists.
    pub fn add_weighted_edge(
        &mut self,
        source: impl Into<VertexId>,
        target: impl Into<VertexId>,
        weight: f64,
    ) -> GraphResult<()> {
        let source = source.into();
        let target = target.into();
        self.lookup(target.as_str())?;
        if source == target {
            self.lookup(source.as_str())?;
            return Err(GraphError::SelfLoop(source));
        }

        let weight = self.weighted.then_some(weight);
        let directed = self.directed;

        let out = self.lookup_mut(source.as_str())?;
        if out.iter().any(|e| e.target == target) {
            return Err(GraphError::DuplicateEdge(source, target));
        }
        out.push(Edge::new(source.clone(), target.clone(), weight));

        if !directed {
            let back = self.lookup_mut(target.as_str())?;
            if !back.iter().any(|e| e.target == source) {
                back.push(Edge::new(target.clone(), source.clone(), weight));
            }
        }

        debug!("Added edge {} -> {} (weight {:?})", source, target, weight);
        Ok(())
    }

    /// Remove the edge `source -> target` (and its mirror on undirected graphs)
    pub fn remove_edge(&mut self, source: impl AsRef<str>, target: impl AsRef<str>) -> GraphResult<()> {
        let (source, target) = (source.as_ref(), target.as_ref());
        self.lookup(target)?;

        let out = self.lookup_mut(source)?;
        let pos = out
            .iter()
            .position(|e| e.ends_at(target))
            .ok_or_else(|| GraphError::EdgeNotFound(source.into(), target.into()))?;
        out.remove(pos);

        if !self.directed {
            let back = self.lookup_mut(target)?;
            back.retain(|e| !e.ends_at(source));
        }

        debug!("Removed edge {} -> {}", source, target);
        Ok(())
    }

    /// Remove a vertex together with every edge that references it
    pub fn remove_vertex(&mut self, vertex: impl AsRef<str>) -> GraphResult<()> {
        let vertex = vertex.as_ref();
        if self.adjacency.shift_remove(vertex).is_none() {
            return Err(GraphError::VertexNotFound(vertex.into()));
        }

        for edges in self.adjacency.values_mut() {
            edges.retain(|e| !e.ends_at(vertex));
        }
        self.positions.remove(vertex);

        debug!("Removed vertex {}", vertex);
        Ok(())
    }

    /// Snapshot of the outgoing edges of `vertex`, in insertion order
    pub fn neighbours(&self, vertex: impl AsRef<str>) -> GraphResult<Vec<Edge>> {
        self.lookup(vertex.as_ref()).cloned()
    }

    /// Edges arriving at `vertex`.
    ///
    /// Directed graphs scan every adjacency list (O(V+E)) and return the arcs
    /// whose target is `vertex`. Undirected graphs return `neighbours(vertex)`.
    pub fn inbound_neighbours(&self, vertex: impl AsRef<str>) -> GraphResult<Vec<Edge>> {
        let vertex = vertex.as_ref();
        if !self.directed {
            return self.neighbours(vertex);
        }
        self.lookup(vertex)?;

        Ok(self
            .adjacency
            .values()
            .flatten()
            .filter(|e| e.ends_at(vertex))
            .cloned()
            .collect())
    }

    /// Whether the edge exists. Undirected graphs require both mirrored arcs.
    pub fn has_edge(&self, source: impl AsRef<str>, target: impl AsRef<str>) -> GraphResult<bool> {
        let (source, target) = (source.as_ref(), target.as_ref());
        let forward = self.lookup(source)?.iter().any(|e| e.ends_at(target));
        let backward = self.lookup(target)?.iter().any(|e| e.ends_at(source));
        Ok(if self.directed { forward } else { forward && backward })
    }

    pub fn contains_vertex(&self, vertex: impl AsRef<str>) -> bool {
        self.adjacency.contains_key(vertex.as_ref())
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> Vec<VertexId> {
        self.adjacency.keys().cloned().collect()
    }

    /// Every stored arc, grouped by source in insertion order.
    /// Undirected edges appear once per direction.
    pub fn edges(&self) -> Vec<Edge> {
        self.adjacency.values().flatten().cloned().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of logical edges: arcs on directed graphs, vertex pairs on undirected ones
    pub fn edge_count(&self) -> usize {
        let arcs: usize = self.adjacency.values().map(|v| v.len()).sum();
        if self.directed {
            arcs
        } else {
            arcs / 2
        }
    }

    /// Switch between directed and undirected.
    ///
    /// Going undirected adds every missing reverse arc. When both directions
    /// already exist with different weights, the arc met first in insertion
    /// order decides the weight of the pair. Going directed keeps both arcs.
    pub fn set_directed(&mut self, directed: bool) {
        if self.directed == directed {
            return;
        }

        if !directed {
            let mut settled: HashSet<(VertexId, VertexId)> = HashSet::new();
            for arc in self.edges() {
                let key = if arc.source <= arc.target {
                    (arc.source.clone(), arc.target.clone())
                } else {
                    (arc.target.clone(), arc.source.clone())
                };
                if !settled.insert(key) {
                    continue;
                }

                if let Some(back) = self.adjacency.get_mut(&arc.target) {
                    match back.iter_mut().find(|e| e.target == arc.source) {
                        Some(existing) => existing.weight = arc.weight,
                        None => back.push(arc.reversed()),
                    }
                }
            }
        }

        self.directed = directed;
        debug!("Converted graph to {}", if directed { "directed" } else { "undirected" });
    }

    /// Switch between weighted and unweighted.
    ///
    /// Going weighted gives every edge weight 0; going unweighted strips weights.
    pub fn set_weighted(&mut self, weighted: bool) {
        if self.weighted == weighted {
            return;
        }

        let weight = weighted.then_some(0.0);
        for edge in self.adjacency.values_mut().flatten() {
            edge.weight = weight;
        }

        self.weighted = weighted;
        debug!("Converted graph to {}", if weighted { "weighted" } else { "unweighted" });
    }

    /// Weight of the edge `source -> target`
    pub fn weight(&self, source: impl AsRef<str>, target: impl AsRef<str>) -> GraphResult<f64> {
        if !self.weighted {
            return Err(GraphError::NotWeighted);
        }
        let (source, target) = (source.as_ref(), target.as_ref());
        self.lookup(target)?;

        self.lookup(source)?
            .iter()
            .find(|e| e.ends_at(target))
            .and_then(|e| e.weight)
            .ok_or_else(|| GraphError::EdgeNotFound(source.into(), target.into()))
    }

    /// Set the weight of `source -> target`.
    ///
    /// Undirected graphs update both mirrored arcs; both are located before
    /// either is written, so a failure leaves the graph untouched.
    pub fn set_weight(&mut self, source: impl AsRef<str>, target: impl AsRef<str>, weight: f64) -> GraphResult<()> {
        if !self.weighted {
            return Err(GraphError::NotWeighted);
        }
        let (source, target) = (source.as_ref(), target.as_ref());
        let not_found = || GraphError::EdgeNotFound(source.into(), target.into());

        let forward = self
            .lookup(source)?
            .iter()
            .position(|e| e.ends_at(target));
        let backward = self
            .lookup(target)?
            .iter()
            .position(|e| e.ends_at(source));

        let forward = forward.ok_or_else(not_found)?;
        let backward = if self.directed {
            None
        } else {
            Some(backward.ok_or_else(not_found)?)
        };

        self.lookup_mut(source)?[forward].weight = Some(weight);
        if let Some(idx) = backward {
            self.lookup_mut(target)?[idx].weight = Some(weight);
        }
        Ok(())
    }

    /// Attach a coordinate to a vertex
    pub fn set_position(&mut self, vertex: impl AsRef<str>, position: impl Into<Position>) -> GraphResult<()> {
        let vertex = vertex.as_ref();
        let (id, _) = self
            .adjacency
            .get_key_value(vertex)
            .ok_or_else(|| GraphError::VertexNotFound(vertex.into()))?;
        let id = id.clone();
        self.positions.insert(id, position.into());
        Ok(())
    }

    pub fn position(&self, vertex: impl AsRef<str>) -> Option<Position> {
        self.positions.get(vertex.as_ref()).copied()
    }

    /// Straight-line distance between two positioned vertices
    pub fn euclidean_distance(&self, a: impl AsRef<str>, b: impl AsRef<str>) -> GraphResult<f64> {
        let (a, b) = (a.as_ref(), b.as_ref());
        let pa = self
            .position(a)
            .ok_or_else(|| GraphError::MissingHeuristicInput(a.into()))?;
        let pb = self
            .position(b)
            .ok_or_else(|| GraphError::MissingHeuristicInput(b.into()))?;
        Ok(pa.distance_to(&pb))
    }

    /// Clear all data, keeping the shape flags
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.positions.clear();
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

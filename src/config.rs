//! Graph shape configuration

use serde::{Deserialize, Serialize};

/// Shape of a [`GraphStore`](crate::GraphStore)
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges are one-way arcs
    pub directed: bool,
    /// Edges carry a weight; otherwise every edge costs 1
    pub weighted: bool,
}

impl GraphConfig {
    pub fn new(directed: bool, weighted: bool) -> Self {
        GraphConfig { directed, weighted }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }
}

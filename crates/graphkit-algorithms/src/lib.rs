pub mod common;
pub mod error;
pub mod pathfinding;
pub mod matching;
pub mod eulerian;

pub use common::{GraphView, NodeIndex};
pub use error::{AlgoError, AlgoResult};
pub use pathfinding::{astar, dijkstra, PathResult, SearchStats};
pub use matching::{bipartition, hopcroft_karp, Bipartition, MatchingResult, Side};
pub use eulerian::{eulerian_circuit, is_eulerian};

//! Error types for algoscope-graph.

use thiserror::Error;

/// Result type for graph construction.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A graph needs at least one node.
    #[error("node count must be positive, got {0}")]
    InvalidNodeCount(usize),

    /// Generation bounds must be finite and positive.
    #[error("invalid bounds {width} x {height}")]
    InvalidBounds { width: f64, height: f64 },

    /// An edge names a node that does not exist.
    #[error("edge ({a}, {b}) references a node outside 0..{len}")]
    EdgeOutOfRange { a: usize, b: usize, len: usize },

    /// Edges must join two distinct nodes.
    #[error("self-loop on node {0}")]
    SelfLoop(usize),

    /// A node index is outside the graph.
    #[error("node {node} outside 0..{len}")]
    NodeOutOfRange { node: usize, len: usize },
}

//! Error types for the engine.

use thiserror::Error;

use crate::catalogue::AlgorithmId;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a run is refused before it starts.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input or relay failure from the core.
    #[error(transparent)]
    Core(#[from] algoscope_core::Error),

    /// Graph construction or lookup failed.
    #[error("Graph error: {0}")]
    Graph(#[from] algoscope_graph::Error),

    /// A sorting algorithm was handed a graph, or a graph algorithm a sequence.
    #[error("{algorithm} expects a {expected}")]
    InputMismatch {
        algorithm: AlgorithmId,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::Core(algoscope_core::Error::InvalidInput(message.into()))
    }
}

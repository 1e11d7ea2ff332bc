//! Error types for algoscope-core.

use thiserror::Error;

/// Result type for algoscope-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before or around an instrumented run.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was rejected before a run could start.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The remote curve-fit channel failed or closed.
    #[error("remote channel error: {0}")]
    RemoteChannel(String),

    /// A message could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

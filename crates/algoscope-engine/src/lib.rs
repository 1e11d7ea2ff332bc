//! Algoscope Engine
//!
//! The control surface around the algorithm crates.
//!
//! # Architecture
//!
//! - **Catalogue**: the fourteen runnable algorithms and their ids
//! - **Engine**: validates input and spawns each run as one tokio task
//! - **Run boundary**: converts panics into a `failed` terminal status and
//!   emits the closing events in a fixed order
//! - **Session**: baseline sequence, graph and the single active run of a view
//! - **Config**: environment-driven defaults
//!
//! # Usage
//!
//! ```ignore
//! let engine = Engine::new();
//! let mut handle = engine.start(
//!     AlgorithmId::Sort(SortAlgorithm::Quick),
//!     Input::Sequence(values),
//!     PaceTier::Fast.pace(),
//! )?;
//! while let Some(event) = handle.events().unwrap().recv().await {
//!     render(event);
//! }
//! let report = handle.wait().await;
//! ```

pub mod catalogue;
pub mod config;
mod engine;
pub mod error;
mod run;
pub mod session;

pub use catalogue::{AlgorithmId, AlgorithmInfo, Family};
pub use config::EngineConfig;
pub use engine::{validate, Engine};
pub use error::{Error, Result};
pub use run::{Input, RunHandle, RunId, RunReport};
pub use session::{random_sequence, ActiveRun, Session, SessionEvent, SessionStatus, StartRequest};

pub use algoscope_core::{PaceTier, RunEvent, RunStatus};
pub use algoscope_path::PathAlgorithm;
pub use algoscope_sort::SortAlgorithm;

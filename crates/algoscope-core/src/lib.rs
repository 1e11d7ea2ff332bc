//! Algoscope Core
//!
//! Instrumentation primitives for running long, multi-step algorithms as
//! observable, interruptible processes.
//!
//! # Architecture
//!
//! - **Metrics**: per-run counters (comparisons, accesses, swaps, visits, time)
//! - **Cancellation**: a shared flag polled at loop checkpoints
//! - **Pacing**: speed tiers mapping to `(step_delay, emit_every)`
//! - **Emitter**: decides which steps are published
//! - **Reporter**: the capability set algorithms report through
//! - **Probe**: bundles the above into the one handle an algorithm receives
//! - **Fit relay**: forwards curve-fit intent to a remote service
//!
//! # Usage
//!
//! ```ignore
//! let source = CancellationSource::new();
//! let mut probe = Probe::new(
//!     EventReporter::new(tx),
//!     PaceTier::Fast.pace(),
//!     source.token(),
//! );
//! while !probe.is_cancelled() {
//!     probe.compare();
//!     probe.step(|| Frame::Full(values.clone())).await;
//! }
//! ```

pub mod cancel;
pub mod emitter;
pub mod error;
pub mod events;
pub mod fit;
pub mod metrics;
pub mod pacing;
pub mod probe;
pub mod reporter;

pub use cancel::{CancellationSource, CancellationToken};
pub use emitter::SnapshotEmitter;
pub use error::{Error, Result};
pub use events::{EdgePair, Frame, PathResult, RunEvent, RunStatus};
pub use metrics::Metrics;
pub use pacing::{Pace, PaceTier};
pub use probe::Probe;
pub use reporter::{EventReporter, EventSink, Reporter};

/// Probe type used by tests and benchmarks that record into memory.
pub type RecordingProbe = Probe<EventReporter<Vec<RunEvent>>>;

impl RecordingProbe {
    /// A probe recording into a `Vec`, paced at the given tier.
    pub fn recording(pace: Pace, token: CancellationToken) -> Self {
        Probe::new(EventReporter::new(Vec::new()), pace, token)
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[RunEvent] {
        self.reporter().sink()
    }
}

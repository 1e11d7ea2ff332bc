//! The start/cancel control surface.

use std::sync::atomic::{AtomicU64, Ordering};

use algoscope_core::{CancellationSource, EventReporter, EventSink, Pace, Probe, RunEvent};
use algoscope_sort::counting::{key_span, MAX_KEY_SPAN};
use algoscope_sort::SortAlgorithm;
use tokio::sync::mpsc;
use tracing::{debug, info_span, Instrument};

use crate::catalogue::AlgorithmId;
use crate::error::{Error, Result};
use crate::run::{drive, Input, RunHandle, RunId};

/// Spawns runs onto the current tokio runtime.
///
/// Each run gets a fresh cancellation source, counter set and emitter; nothing
/// is shared between runs except read-only input.
#[derive(Debug, Default)]
pub struct Engine {
    next_id: AtomicU64,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the id of the next run.
    pub fn next_run_id(&self) -> RunId {
        RunId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Validate `input` and start `algorithm` on it, streaming events into a
    /// channel owned by the returned handle.
    pub fn start(&self, algorithm: AlgorithmId, input: Input, pace: Pace) -> Result<RunHandle> {
        let (tx, rx) = mpsc::unbounded_channel::<RunEvent>();
        self.spawn(self.next_run_id(), algorithm, input, pace, tx, Some(rx))
    }

    /// Like [`Engine::start`], publishing into a caller-supplied sink.
    pub fn start_with_sink<S>(
        &self,
        algorithm: AlgorithmId,
        input: Input,
        pace: Pace,
        sink: S,
    ) -> Result<RunHandle>
    where
        S: EventSink + 'static,
    {
        self.spawn(self.next_run_id(), algorithm, input, pace, sink, None)
    }

    /// Start under an id obtained from [`Engine::next_run_id`], so the sink
    /// can be labelled before the run exists.
    pub fn start_as<S>(
        &self,
        id: RunId,
        algorithm: AlgorithmId,
        input: Input,
        pace: Pace,
        sink: S,
    ) -> Result<RunHandle>
    where
        S: EventSink + 'static,
    {
        self.spawn(id, algorithm, input, pace, sink, None)
    }

    fn spawn<S>(
        &self,
        id: RunId,
        algorithm: AlgorithmId,
        input: Input,
        pace: Pace,
        sink: S,
        events: Option<mpsc::UnboundedReceiver<RunEvent>>,
    ) -> Result<RunHandle>
    where
        S: EventSink + 'static,
    {
        validate(algorithm, &input)?;

        let source = CancellationSource::new();
        let probe = Probe::new(EventReporter::new(sink), pace, source.token());
        debug!(run = %id, %algorithm, ?pace, "spawning run");

        let span = info_span!("run", id = id.0, algorithm = %algorithm);
        let task = tokio::spawn(drive(id, algorithm, input, probe).instrument(span));
        Ok(RunHandle::new(id, algorithm, source, events, task))
    }
}

/// Reject input a run could not start on. Nothing is spawned on error.
pub fn validate(algorithm: AlgorithmId, input: &Input) -> Result<()> {
    match (algorithm, input) {
        (AlgorithmId::Sort(sort), Input::Sequence(values)) => {
            if values.is_empty() {
                return Err(Error::invalid("sequence is empty"));
            }
            if sort == SortAlgorithm::Counting {
                let span = key_span(values).unwrap_or(0);
                if span > MAX_KEY_SPAN {
                    return Err(Error::invalid(format!(
                        "key span {span} exceeds counting sort limit {MAX_KEY_SPAN}"
                    )));
                }
            }
            Ok(())
        }
        (AlgorithmId::Path(_), Input::Graph { graph, start, goal }) => {
            if graph.is_empty() {
                return Err(Error::invalid("graph has no nodes"));
            }
            graph.check_node(*start)?;
            graph.check_node(*goal)?;
            Ok(())
        }
        (algorithm, _) => Err(Error::InputMismatch {
            algorithm,
            expected: algorithm.expects(),
        }),
    }
}

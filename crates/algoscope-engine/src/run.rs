//! One spawned run: its handle, its report and the boundary it executes in.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use algoscope_core::{
    CancellationSource, EventReporter, EventSink, Frame, Metrics, PathResult, Probe, RunEvent,
    RunStatus,
};
use algoscope_graph::Graph;
use algoscope_path::PathExit;
use algoscope_sort::counting::MAX_KEY_SPAN;
use algoscope_sort::SortExit;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::catalogue::AlgorithmId;

/// Identifier of a run, unique per [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a run operates on.
#[derive(Debug, Clone)]
pub enum Input {
    Sequence(Vec<i64>),
    Graph {
        graph: Arc<Graph>,
        start: usize,
        goal: usize,
    },
}

impl Input {
    /// A graph input between its default start and goal.
    pub fn graph(graph: Arc<Graph>) -> Self {
        let (start, goal) = (graph.start(), graph.goal());
        Input::Graph { graph, start, goal }
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub id: RunId,
    pub algorithm: AlgorithmId,
    #[serde(flatten)]
    pub status: RunStatus,
    pub metrics: Metrics,
    /// Working sequence as the run left it. Always a permutation of the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathResult>,
}

/// Control over a spawned run.
///
/// Dropping the handle does not stop the run; call [`RunHandle::cancel`].
#[derive(Debug)]
pub struct RunHandle {
    id: RunId,
    algorithm: AlgorithmId,
    source: CancellationSource,
    events: Option<mpsc::UnboundedReceiver<RunEvent>>,
    task: JoinHandle<RunReport>,
}

impl RunHandle {
    pub(crate) fn new(
        id: RunId,
        algorithm: AlgorithmId,
        source: CancellationSource,
        events: Option<mpsc::UnboundedReceiver<RunEvent>>,
        task: JoinHandle<RunReport>,
    ) -> Self {
        Self { id, algorithm, source, events, task }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Request cooperative cancellation. Idempotent.
    pub fn cancel(&self) {
        self.source.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.source.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// The event stream, when the run was started with its own channel.
    pub fn events(&mut self) -> Option<&mut mpsc::UnboundedReceiver<RunEvent>> {
        self.events.as_mut()
    }

    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<RunEvent>> {
        self.events.take()
    }

    /// Wait for the run to reach its terminal status.
    pub async fn wait(self) -> RunReport {
        match self.task.await {
            Ok(report) => report,
            Err(e) => {
                warn!(run = %self.id, "run task did not finish: {e}");
                RunReport {
                    id: self.id,
                    algorithm: self.algorithm,
                    status: RunStatus::Failed { message: e.to_string() },
                    metrics: Metrics::new(),
                    sequence: None,
                    path: None,
                }
            }
        }
    }

    /// Cancel, then wait for the run to stop.
    pub async fn stop(self) -> RunReport {
        self.cancel();
        self.wait().await
    }
}

/// Result of the algorithm body, before the terminal events go out.
struct Outcome {
    status: RunStatus,
    frame: Option<Frame>,
    sequence: Option<Vec<i64>>,
    path: Option<PathResult>,
}

async fn execute<S: EventSink>(
    algorithm: AlgorithmId,
    input: Input,
    probe: &mut Probe<EventReporter<S>>,
) -> Outcome {
    match (algorithm, input) {
        (AlgorithmId::Sort(sort), Input::Sequence(mut values)) => {
            let status = match sort.run(&mut values, probe).await {
                SortExit::Sorted => RunStatus::Completed,
                SortExit::Cancelled => RunStatus::Cancelled,
                SortExit::KeySpanTooWide { span } => RunStatus::Failed {
                    message: format!("key span {span} exceeds counting sort limit {MAX_KEY_SPAN}"),
                },
            };
            Outcome {
                status,
                frame: Some(Frame::Full(values.clone())),
                sequence: Some(values),
                path: None,
            }
        }
        (AlgorithmId::Path(search), Input::Graph { graph, start, goal }) => {
            let (status, path) = match search.run(&graph, start, goal, probe).await {
                PathExit::Found(path) => (RunStatus::Completed, Some(path)),
                PathExit::NoPath => (RunStatus::NoPath, None),
                PathExit::Cancelled => (RunStatus::Cancelled, None),
            };
            Outcome { status, frame: None, sequence: None, path }
        }
        (algorithm, _) => Outcome {
            status: RunStatus::Failed {
                message: format!("{algorithm} expects a {}", algorithm.expects()),
            },
            frame: None,
            sequence: None,
            path: None,
        },
    }
}

/// Run the algorithm to a terminal status and emit the closing events: the
/// final frame, an empty highlight, the final metrics, the path if one was
/// found, and the terminal event last of all.
pub(crate) async fn drive<S: EventSink>(
    id: RunId,
    algorithm: AlgorithmId,
    input: Input,
    mut probe: Probe<EventReporter<S>>,
) -> RunReport {
    info!("run started");
    probe.restart_clock();
    let result = AssertUnwindSafe(execute(algorithm, input, &mut probe))
        .catch_unwind()
        .await;

    let outcome = result.unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(%message, "run failed");
        Outcome {
            status: RunStatus::Failed { message },
            frame: None,
            sequence: None,
            path: None,
        }
    });

    if outcome.status.is_completed() && probe.pace().is_benchmark() {
        let elapsed = probe.elapsed();
        probe.reporter_mut().metrics_mut().record_elapsed(elapsed);
    }

    let metrics = *probe.metrics();
    let reporter = probe.reporter_mut();
    if let Some(frame) = outcome.frame {
        reporter.emit(frame.into());
    }
    reporter.emit(RunEvent::Highlight { focus: Vec::new() });
    reporter.emit_metrics();
    if let Some(path) = &outcome.path {
        reporter.emit(RunEvent::Path(path.clone()));
    }
    reporter.emit(outcome.status.clone().into());

    info!(
        status = ?outcome.status,
        comparisons = metrics.comparisons,
        swaps = metrics.swaps,
        visited = metrics.visited,
        "run finished"
    );

    RunReport {
        id,
        algorithm,
        status: outcome.status,
        metrics,
        sequence: outcome.sequence,
        path: outcome.path,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "algorithm panicked".to_string()
    }
}

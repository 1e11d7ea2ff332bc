//! Per-view state: baseline data, the active run and its observers.

use std::sync::Arc;

use algoscope_core::{EventSink, PaceTier, RunEvent, RunStatus};
use algoscope_graph::Graph;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use crate::catalogue::AlgorithmId;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::run::{Input, RunHandle, RunId, RunReport};

/// Buffered session events per observer before the slowest one lags.
const EVENT_BUFFER: usize = 4096;

/// A run event tagged with the run it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEvent {
    pub run: RunId,
    pub algorithm: AlgorithmId,
    #[serde(flatten)]
    pub event: RunEvent,
}

/// Request to start a run in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub algorithm: AlgorithmId,
    #[serde(default)]
    pub pace: Option<PaceTier>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub goal: Option<usize>,
}

impl StartRequest {
    pub fn new(algorithm: impl Into<AlgorithmId>) -> Self {
        Self {
            algorithm: algorithm.into(),
            pace: None,
            start: None,
            goal: None,
        }
    }

    pub fn with_pace(mut self, pace: PaceTier) -> Self {
        self.pace = Some(pace);
        self
    }
}

/// Summary of the session for status queries.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub active: Option<ActiveRun>,
    pub last: Option<RunStatus>,
    pub sequence_len: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub pace: PaceTier,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActiveRun {
    pub id: RunId,
    pub algorithm: AlgorithmId,
}

struct BroadcastSink {
    run: RunId,
    algorithm: AlgorithmId,
    tx: broadcast::Sender<SessionEvent>,
}

impl EventSink for BroadcastSink {
    fn send(&mut self, event: RunEvent) {
        let event = SessionEvent {
            run: self.run,
            algorithm: self.algorithm,
            event,
        };
        if self.tx.send(event).is_err() {
            trace!("no session observers");
        }
    }
}

/// One view's worth of state.
///
/// Holds the baseline sequence and the graph shared read-only by runs, the
/// working copy the last sort left behind, and at most one active run. Every
/// operation that would replace data or start a run first cancels the active
/// run and waits for it to stop.
pub struct Session {
    config: EngineConfig,
    engine: Engine,
    baseline: Vec<i64>,
    working: Vec<i64>,
    graph: Arc<Graph>,
    active: Option<RunHandle>,
    last: Option<RunReport>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Create a session with freshly generated data.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let sequence = config.generate_sequence(None)?;
        let graph = config.generate_graph(None)?;
        Ok(Self::with_data(config, sequence, graph))
    }

    /// Create a session over given data.
    pub fn with_data(config: EngineConfig, sequence: Vec<i64>, graph: Graph) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            config,
            engine: Engine::new(),
            working: sequence.clone(),
            baseline: sequence,
            graph: Arc::new(graph),
            active: None,
            last: None,
            events,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Observe events of every run started from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// The sequence the next sort starts from.
    pub fn sequence(&self) -> &[i64] {
        &self.working
    }

    pub fn baseline(&self) -> &[i64] {
        &self.baseline
    }

    pub fn graph(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last.as_ref()
    }

    pub fn active(&self) -> Option<ActiveRun> {
        self.active
            .as_ref()
            .filter(|h| !h.is_finished())
            .map(|h| ActiveRun { id: h.id(), algorithm: h.algorithm() })
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.active(),
            last: self.last.as_ref().map(|r| r.status.clone()),
            sequence_len: self.working.len(),
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            pace: self.config.pace,
        }
    }

    /// Start a run, stopping any active one first.
    pub async fn start(&mut self, request: StartRequest) -> Result<RunId> {
        self.stop().await;

        let algorithm = request.algorithm;
        let input = match algorithm {
            AlgorithmId::Sort(_) => Input::Sequence(self.working.clone()),
            AlgorithmId::Path(_) => Input::Graph {
                graph: self.graph(),
                start: request.start.unwrap_or_else(|| self.graph.start()),
                goal: request.goal.unwrap_or_else(|| self.graph.goal()),
            },
        };
        let tier = request.pace.unwrap_or(self.config.pace);
        let id = self.engine.next_run_id();
        let sink = BroadcastSink { run: id, algorithm, tx: self.events.clone() };
        let handle = self.engine.start_as(id, algorithm, input, tier.pace(), sink)?;

        info!(run = %id, %algorithm, pace = %tier, "session run started");
        self.active = Some(handle);
        Ok(id)
    }

    /// Request cancellation of the active run without waiting.
    /// Returns whether a run was running.
    pub fn cancel(&self) -> bool {
        match &self.active {
            Some(handle) if !handle.is_finished() => {
                handle.cancel();
                true
            }
            _ => false,
        }
    }

    /// Cancel the active run and wait until it has stopped.
    pub async fn stop(&mut self) -> Option<&RunReport> {
        let handle = self.active.take()?;
        let report = handle.stop().await;
        debug!(run = %report.id, status = ?report.status, "run stopped");
        if let Some(sequence) = &report.sequence {
            self.working.clone_from(sequence);
        }
        self.last = Some(report);
        self.last.as_ref()
    }

    /// Collect the active run's report if it has already finished.
    pub async fn settle(&mut self) -> Option<&RunReport> {
        if self.active.as_ref().is_some_and(RunHandle::is_finished) {
            self.stop().await;
        }
        self.last.as_ref()
    }

    /// Stop the active run and restore the working sequence from the baseline.
    pub async fn reset(&mut self) {
        self.stop().await;
        self.working.clone_from(&self.baseline);
        debug!(len = self.working.len(), "sequence reset to baseline");
    }

    /// Stop the active run and replace the baseline with a new random sequence.
    pub async fn regenerate_sequence(&mut self, len: Option<usize>) -> Result<()> {
        let sequence = self.config.generate_sequence(len)?;
        self.replace_sequence(sequence).await;
        Ok(())
    }

    /// Stop the active run and swap in a freshly generated graph.
    ///
    /// Generation happens while `self` is borrowed; servers sharing the
    /// session behind a lock should generate through [`EngineConfig`] first
    /// and hand the result to [`Session::replace_graph`].
    pub async fn regenerate_graph(&mut self, node_count: Option<usize>) -> Result<()> {
        let graph = self.config.generate_graph(node_count)?;
        self.replace_graph(graph).await;
        Ok(())
    }

    /// Stop the active run and make `sequence` the new baseline.
    pub async fn replace_sequence(&mut self, sequence: Vec<i64>) {
        self.stop().await;
        self.working = sequence.clone();
        self.baseline = sequence;
        debug!(len = self.baseline.len(), "sequence replaced");
    }

    /// Stop the active run and make `graph` the session's graph.
    pub async fn replace_graph(&mut self, graph: Graph) {
        self.stop().await;
        self.graph = Arc::new(graph);
        debug!(nodes = self.graph.node_count(), edges = self.graph.edge_count(), "graph replaced");
    }
}

/// `len` values drawn uniformly from `1..=value_max`.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, len: usize, value_max: i64) -> Result<Vec<i64>> {
    if len == 0 {
        return Err(Error::invalid("sequence length must be positive"));
    }
    if value_max < 1 {
        return Err(Error::invalid(format!("value_max must be positive, got {value_max}")));
    }
    Ok((0..len).map(|_| rng.gen_range(1..=value_max)).collect())
}

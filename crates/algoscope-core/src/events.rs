//! Events streamed to the observer of a run.

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Undirected edge as a canonical `(low, high)` node pair.
pub type EdgePair = (usize, usize);

/// A publishable view of a run's intermediate state.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The whole working sequence.
    Full(Vec<i64>),
    /// A contiguous range of the sequence starting at `offset`.
    Range { offset: usize, values: Vec<i64> },
    /// Search progress over a graph.
    Search {
        visited: Vec<usize>,
        edges: Vec<EdgePair>,
    },
    /// Current visiting order of a tour under construction, with the real
    /// edges its legs have discovered so far.
    Tour {
        order: Vec<usize>,
        edges: Vec<EdgePair>,
    },
}

/// Path found by a search, or the closed route of a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Nodes along real graph edges, from start to goal (or back to start).
    pub route: Vec<usize>,
    /// Sum of Euclidean edge lengths along `route`.
    pub distance: f64,
    /// Visiting order for tours; each node appears exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<Vec<usize>>,
}

impl PathResult {
    pub fn start(&self) -> Option<usize> {
        self.route.first().copied()
    }

    pub fn end(&self) -> Option<usize> {
        self.route.last().copied()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RunStatus {
    Completed,
    Cancelled,
    /// The search ran out of frontier without reaching its goal.
    NoPath,
    /// An internal fault was caught at the run boundary.
    Failed { message: String },
}

impl RunStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

/// One message in the observer stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RunEvent {
    State {
        values: Vec<i64>,
    },
    Partial {
        offset: usize,
        values: Vec<i64>,
    },
    Search {
        visited: Vec<usize>,
        edges: Vec<EdgePair>,
    },
    Tour {
        order: Vec<usize>,
        edges: Vec<EdgePair>,
    },
    /// Positions or nodes under focus. Empty means inactive.
    Highlight {
        focus: Vec<usize>,
    },
    Metrics(Metrics),
    Path(PathResult),
    Completed,
    Cancelled,
    NoPath,
    Failed {
        message: String,
    },
}

impl RunEvent {
    /// Whether this event ends the stream for its run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunEvent::Completed | RunEvent::Cancelled | RunEvent::NoPath | RunEvent::Failed { .. }
        )
    }
}

impl From<Frame> for RunEvent {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Full(values) => RunEvent::State { values },
            Frame::Range { offset, values } => RunEvent::Partial { offset, values },
            Frame::Search { visited, edges } => RunEvent::Search { visited, edges },
            Frame::Tour { order, edges } => RunEvent::Tour { order, edges },
        }
    }
}

impl From<RunStatus> for RunEvent {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => RunEvent::Completed,
            RunStatus::Cancelled => RunEvent::Cancelled,
            RunStatus::NoPath => RunEvent::NoPath,
            RunStatus::Failed { message } => RunEvent::Failed { message },
        }
    }
}

//! Request and response bodies for the HTTP routes and the WebSocket.

use algoscope_engine::{RunId, StartRequest};
use algoscope_graph::{Graph, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SequenceView {
    pub values: Vec<i64>,
    pub baseline: Vec<i64>,
}

/// Graph as clients draw it.
#[derive(Debug, Serialize)]
pub struct GraphView {
    pub points: Vec<Point>,
    pub edges: Vec<(usize, usize)>,
    pub start: usize,
    pub goal: usize,
}

impl From<&Graph> for GraphView {
    fn from(graph: &Graph) -> Self {
        Self {
            points: graph.points().to_vec(),
            edges: graph.edges().iter().map(|e| e.pair()).collect(),
            start: graph.start(),
            goal: graph.goal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Started {
    pub run: RunId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cancelled {
    pub cancelled: bool,
}

/// Which data `POST /api/regenerate` replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerateTarget {
    Sequence,
    Graph,
    #[default]
    Both,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    #[serde(default)]
    pub target: RegenerateTarget,
    #[serde(default)]
    pub sequence_len: Option<usize>,
    #[serde(default)]
    pub node_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Commands accepted over `/ws`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    Start(StartRequest),
    Cancel,
    Reset,
    GetStatus,
}

/// Direct replies to [`WsCommand`]s. Run events are sent as they are.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsReply {
    Started { run: RunId },
    CancelRequested { cancelled: bool },
    Reset,
    Status(algoscope_engine::SessionStatus),
    Error { message: String },
}

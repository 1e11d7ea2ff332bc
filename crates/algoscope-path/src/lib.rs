//! Algoscope Path
//!
//! Graph searches and tour heuristics written as observable, interruptible
//! processes over an [`algoscope_graph::Graph`].
//!
//! - **Point-to-point**: breadth-first, depth-first, Dijkstra and A*
//! - **Tours**: nearest and farthest insertion over shortest-path distances
//!
//! Each run owns a [`SearchState`]: the visited nodes in discovery order,
//! the discovered edges (which only grow) and a predecessor per reached node.
//! Every edge added to the frontier is published, whether or not it ends up
//! on the reported path. Exhausting the frontier ends the run with
//! [`PathExit::NoPath`], which is distinct from cancellation.

use std::fmt;
use std::str::FromStr;

use algoscope_core::{Error, PathResult, Probe, Reporter};
use algoscope_graph::Graph;
use serde::{Deserialize, Serialize};

pub mod best_first;
pub mod bfs;
pub mod dfs;
mod state;
pub mod tour;

pub use state::SearchState;
pub use tour::Insertion;

/// How a search returned.
#[derive(Debug, Clone, PartialEq)]
pub enum PathExit {
    Found(PathResult),
    NoPath,
    Cancelled,
}

impl PathExit {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PathExit::Cancelled)
    }

    pub fn path(&self) -> Option<&PathResult> {
        match self {
            PathExit::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Publish the final state and build the result from the predecessor chain.
pub(crate) fn found<R: Reporter>(
    graph: &Graph,
    state: &SearchState,
    start: usize,
    goal: usize,
    probe: &mut Probe<R>,
) -> PathExit {
    probe.publish_now(state.frame());
    match state.route_to(start, goal) {
        Some(route) => PathExit::Found(PathResult {
            distance: graph.route_length(&route),
            route,
            tour: None,
        }),
        None => PathExit::NoPath,
    }
}

pub(crate) fn exhausted<R: Reporter>(state: &SearchState, probe: &mut Probe<R>) -> PathExit {
    probe.publish_now(state.frame());
    PathExit::NoPath
}

/// The graph strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    NearestInsertion,
    FarthestInsertion,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 6] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
        PathAlgorithm::NearestInsertion,
        PathAlgorithm::FarthestInsertion,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dfs => "dfs",
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "a_star",
            PathAlgorithm::NearestInsertion => "nearest_insertion",
            PathAlgorithm::FarthestInsertion => "farthest_insertion",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "Breadth-First Search",
            PathAlgorithm::Dfs => "Depth-First Search",
            PathAlgorithm::Dijkstra => "Dijkstra",
            PathAlgorithm::AStar => "A*",
            PathAlgorithm::NearestInsertion => "Nearest Insertion Tour",
            PathAlgorithm::FarthestInsertion => "Farthest Insertion Tour",
        }
    }

    /// Tours ignore the goal and return to their start.
    pub fn is_tour(self) -> bool {
        matches!(self, PathAlgorithm::NearestInsertion | PathAlgorithm::FarthestInsertion)
    }

    pub fn complexity(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "O(V + E), fewest edges",
            PathAlgorithm::Dfs => "O(V + E), no shortest-path guarantee",
            PathAlgorithm::Dijkstra => "O((V + E) log V), shortest Euclidean length",
            PathAlgorithm::AStar => "O((V + E) log V), straight-line heuristic",
            PathAlgorithm::NearestInsertion => "O(V (V + E) log V) setup, O(V^2) per insertion",
            PathAlgorithm::FarthestInsertion => "O(V (V + E) log V) setup, O(V^2) per insertion",
        }
    }

    pub async fn run<R: Reporter>(
        self,
        graph: &Graph,
        start: usize,
        goal: usize,
        probe: &mut Probe<R>,
    ) -> PathExit {
        match self {
            PathAlgorithm::Bfs => bfs::search(graph, start, goal, probe).await,
            PathAlgorithm::Dfs => dfs::search(graph, start, goal, probe).await,
            PathAlgorithm::Dijkstra => best_first::dijkstra(graph, start, goal, probe).await,
            PathAlgorithm::AStar => best_first::a_star(graph, start, goal, probe).await,
            PathAlgorithm::NearestInsertion => tour::nearest(graph, start, probe).await,
            PathAlgorithm::FarthestInsertion => tour::farthest(graph, start, probe).await,
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PathAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathAlgorithm::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown graph algorithm: {s}")))
    }
}

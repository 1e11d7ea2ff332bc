//! Nearest- and farthest-insertion tours.
//!
//! The graph is not complete, so both heuristics work over shortest-path
//! distances computed once up front. The reported route replaces every tour
//! leg with its real shortest path and sums true edge lengths.

use algoscope_core::{PathResult, Probe, Reporter};
use algoscope_graph::{AllPairs, Graph, ShortestPaths};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::SearchState;
use crate::PathExit;

/// Which unvisited node joins the tour next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insertion {
    /// The node closest to the tour.
    Nearest,
    /// The node whose distance to the tour is largest.
    Farthest,
}

impl Insertion {
    fn prefers(self, candidate: f64, best: f64) -> bool {
        match self {
            Insertion::Nearest => candidate < best,
            Insertion::Farthest => candidate > best,
        }
    }

    fn worst(self) -> f64 {
        match self {
            Insertion::Nearest => f64::INFINITY,
            Insertion::Farthest => f64::NEG_INFINITY,
        }
    }
}

pub async fn nearest<R: Reporter>(graph: &Graph, start: usize, probe: &mut Probe<R>) -> PathExit {
    build(graph, start, Insertion::Nearest, probe).await
}

pub async fn farthest<R: Reporter>(graph: &Graph, start: usize, probe: &mut Probe<R>) -> PathExit {
    build(graph, start, Insertion::Farthest, probe).await
}

/// Cost of putting `c` between `a` and `b`.
#[inline]
pub fn insertion_cost(paths: &AllPairs, a: usize, c: usize, b: usize) -> f64 {
    if a == b {
        return 2.0 * paths.distance(a, c);
    }
    paths.distance(a, c) + paths.distance(c, b) - paths.distance(a, b)
}

pub async fn build<R: Reporter>(
    graph: &Graph,
    start: usize,
    policy: Insertion,
    probe: &mut Probe<R>,
) -> PathExit {
    let n = graph.node_count();
    if !graph.contains(start) {
        return PathExit::NoPath;
    }

    let mut rows = Vec::with_capacity(n);
    for source in 0..n {
        if probe.is_cancelled() {
            return PathExit::Cancelled;
        }
        rows.push(ShortestPaths::from_source(graph, source));
        probe.yield_now().await;
    }
    let paths = AllPairs::from_rows(rows);
    if !paths.is_complete() {
        debug!(nodes = n, "graph is disconnected, no tour");
        return PathExit::NoPath;
    }

    let mut state = SearchState::new(n);
    let mut tour = vec![start];
    // Distance from every node to its closest tour member.
    let mut reach: Vec<f64> = (0..n).map(|v| paths.distance(start, v)).collect();
    state.mark(start);
    probe.visit();

    while tour.len() < n {
        if probe.is_cancelled() {
            return PathExit::Cancelled;
        }

        let mut chosen: Option<(usize, f64)> = None;
        for c in (0..n).filter(|&c| !state.is_visited(c)) {
            probe.compare();
            probe.access(1);
            let best = chosen.map_or(policy.worst(), |(_, d)| d);
            if chosen.is_none() || policy.prefers(reach[c], best) {
                chosen = Some((c, reach[c]));
            }
        }
        let Some((c, _)) = chosen else {
            break;
        };

        let mut position = 1;
        let mut cheapest = f64::INFINITY;
        for i in 0..tour.len() {
            let (a, b) = (tour[i], tour[(i + 1) % tour.len()]);
            let cost = insertion_cost(&paths, a, c, b);
            probe.compare();
            probe.access(2);
            if cost < cheapest {
                cheapest = cost;
                position = i + 1;
            }
        }

        let a = tour[position - 1];
        let b = tour[position % tour.len()];
        tour.insert(position, c);
        state.mark(c);
        probe.visit();
        probe.highlight(&[a, c, b]);
        for (x, y) in [(a, c), (c, b)] {
            if let Some(leg) = paths.path(x, y) {
                for w in leg.windows(2) {
                    state.add_edge(w[0], w[1]);
                }
            }
        }
        for (v, r) in reach.iter_mut().enumerate() {
            *r = r.min(paths.distance(c, v));
        }

        probe.step(|| state.tour_frame(&tour)).await;
    }

    let Some(route) = close(&paths, &tour) else {
        return PathExit::NoPath;
    };
    probe.publish_now(state.frame());
    probe.publish_now(state.tour_frame(&tour));
    PathExit::Found(PathResult {
        distance: graph.route_length(&route),
        route,
        tour: Some(tour),
    })
}

/// Expand the closed tour into real graph edges, back to its first node.
fn close(paths: &AllPairs, tour: &[usize]) -> Option<Vec<usize>> {
    let Some(&first) = tour.first() else {
        return Some(Vec::new());
    };
    let mut route = vec![first];
    if tour.len() == 1 {
        return Some(route);
    }
    for i in 0..tour.len() {
        let leg = paths.path(tour[i], tour[(i + 1) % tour.len()])?;
        route.extend_from_slice(&leg[1..]);
    }
    Some(route)
}

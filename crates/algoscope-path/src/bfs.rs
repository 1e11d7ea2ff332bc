//! Breadth-first search.
//!
//! Nodes are marked on enqueue, so the first time the goal is popped its
//! predecessor chain has the fewest possible edges.

use std::collections::VecDeque;

use algoscope_core::{Probe, Reporter};
use algoscope_graph::Graph;

use crate::state::SearchState;
use crate::{exhausted, found, PathExit};

pub async fn search<R: Reporter>(
    graph: &Graph,
    start: usize,
    goal: usize,
    probe: &mut Probe<R>,
) -> PathExit {
    if !graph.contains(start) || !graph.contains(goal) {
        return PathExit::NoPath;
    }
    let mut state = SearchState::new(graph.node_count());
    let mut queue = VecDeque::from([start]);
    state.mark(start);

    loop {
        if probe.is_cancelled() {
            return PathExit::Cancelled;
        }
        let Some(node) = queue.pop_front() else {
            break;
        };
        probe.visit();
        probe.highlight(&[node]);
        if node == goal {
            return found(graph, &state, start, goal, probe);
        }
        for &next in graph.neighbors(node) {
            probe.access(1);
            if state.discover(node, next) {
                queue.push_back(next);
            }
        }
        probe.step(|| state.frame()).await;
    }
    exhausted(&state, probe)
}

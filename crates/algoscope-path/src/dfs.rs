//! Depth-first search with an explicit stack of `(node, neighbour cursor)`.

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
    let mut stack = vec![(start, 0usize)];
    state.mark(start);
    probe.visit();

    loop {
        if probe.is_cancelled() {
            return PathExit::Cancelled;
        }
        let Some(&(node, mut cursor)) = stack.last() else {
            break;
        };
        probe.highlight(&[node]);
        if node == goal {
            return found(graph, &state, start, goal, probe);
        }

        let neighbors = graph.neighbors(node);
        while cursor < neighbors.len() && state.is_visited(neighbors[cursor]) {
            probe.access(1);
            cursor += 1;
        }
        let top = stack.len() - 1;
        if let Some(&next) = neighbors.get(cursor) {
            probe.access(1);
            stack[top].1 = cursor + 1;
            state.discover(node, next);
            probe.visit();
            stack.push((next, 0));
        } else {
            stack.pop();
        }
        probe.step(|| state.frame()).await;
    }
    exhausted(&state, probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bench_probe, graph, square};

    #[tokio::test]
    async fn follows_first_neighbour_deep() {
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(path) = search(&square(), 0, 2, &mut probe).await else {
            panic!("expected a path");
        };
        // Neighbours of 0 are [1, 3]; 1 is tried first.
        assert_eq!(path.route, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn backtracks_out_of_dead_ends() {
        // 0 -> 1 is a dead end; the goal hangs off 0 -> 2.
        let g = graph(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 2.0)],
            &[(0, 1), (0, 2), (2, 3)],
        );
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(path) = search(&g, 0, 3, &mut probe).await else {
            panic!("expected a path");
        };
        assert_eq!(path.route, vec![0, 2, 3]);
        assert_eq!(probe.metrics().visited, 4);
    }

    #[tokio::test]
    async fn disconnected_goal_has_no_path() {
        let g = graph(&[(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)], &[(0, 1)]);
        let (mut probe, _source) = bench_probe();
        assert_eq!(search(&g, 0, 2, &mut probe).await, PathExit::NoPath);
    }
}

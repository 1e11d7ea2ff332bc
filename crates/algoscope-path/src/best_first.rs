//! Dijkstra and A*: best-first search over Euclidean edge lengths.
//!
//! Both pop the cheapest queue entry, skip stale duplicates through a private
//! settled set, and relax every unsettled neighbour. A* adds the straight-line
//! distance to the goal to each key; edge lengths are themselves straight
//! lines, so the heuristic never overestimates.

use std::collections::BinaryHeap;

use algoscope_core::{Probe, Reporter};
use algoscope_graph::{Graph, MinCost};

use crate::state::SearchState;
use crate::{exhausted, found, PathExit};

pub async fn dijkstra<R: Reporter>(
    graph: &Graph,
    start: usize,
    goal: usize,
    probe: &mut Probe<R>,
) -> PathExit {
    search(graph, start, goal, probe, |_| 0.0).await
}

pub async fn a_star<R: Reporter>(
    graph: &Graph,
    start: usize,
    goal: usize,
    probe: &mut Probe<R>,
) -> PathExit {
    if !graph.contains(goal) {
        return PathExit::NoPath;
    }
    search(graph, start, goal, probe, |node| graph.distance(node, goal)).await
}

async fn search<R, H>(
    graph: &Graph,
    start: usize,
    goal: usize,
    probe: &mut Probe<R>,
    heuristic: H,
) -> PathExit
where
    R: Reporter,
    H: Fn(usize) -> f64,
{
    if !graph.contains(start) || !graph.contains(goal) {
        return PathExit::NoPath;
    }
    let n = graph.node_count();
    let mut state = SearchState::new(n);
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist[start] = 0.0;
    state.mark(start);
    heap.push(MinCost { cost: heuristic(start), node: start, seq });

    loop {
        if probe.is_cancelled() {
            return PathExit::Cancelled;
        }
        let Some(MinCost { node, .. }) = heap.pop() else {
            break;
        };
        if settled[node] {
            continue;
        }
        settled[node] = true;
        probe.visit();
        probe.highlight(&[node]);
        if node == goal {
            return found(graph, &state, start, goal, probe);
        }

        for &next in graph.neighbors(node) {
            if settled[next] {
                continue;
            }
            let alt = dist[node] + graph.distance(node, next);
            probe.compare();
            probe.access(2);
            if alt < dist[next] {
                dist[next] = alt;
                state.relax(node, next);
                seq += 1;
                heap.push(MinCost { cost: alt + heuristic(next), node: next, seq });
            }
        }
        probe.step(|| state.frame()).await;
    }
    exhausted(&state, probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bench_probe, graph, square};
    use algoscope_graph::{generate_with, Bounds, ShortestPaths};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn square_takes_two_unit_edges() {
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(path) = dijkstra(&square(), 0, 2, &mut probe).await else {
            panic!("expected a path");
        };
        assert_eq!(path.distance, 2.0);
        assert_eq!(path.hops(), 2);
    }

    #[tokio::test]
    async fn prefers_shorter_length_over_fewer_hops() {
        let g = graph(
            &[(0.0, 0.0), (1.0, 0.1), (2.0, 0.1), (3.0, 0.0), (1.5, 5.0)],
            &[(0, 1), (1, 2), (2, 3), (0, 4), (4, 3)],
        );
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(d) = dijkstra(&g, 0, 3, &mut probe).await else {
            panic!("expected a path");
        };
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(a) = a_star(&g, 0, 3, &mut probe).await else {
            panic!("expected a path");
        };
        assert_eq!(d.route, vec![0, 1, 2, 3]);
        assert_eq!(a.route, d.route);
    }

    #[tokio::test]
    async fn a_star_matches_dijkstra_on_random_graphs() {
        for seed in 0..20 {
            let g = generate_with(&mut StdRng::seed_from_u64(seed), 60, Bounds::default()).unwrap();
            let (goal, exact) = (g.goal(), ShortestPaths::from_source(&g, 0));

            let (mut probe, _source) = bench_probe();
            let PathExit::Found(d) = dijkstra(&g, 0, goal, &mut probe).await else {
                panic!("dijkstra found nothing");
            };

            let (mut probe, _source) = bench_probe();
            let PathExit::Found(a) = a_star(&g, 0, goal, &mut probe).await else {
                panic!("a* found nothing");
            };

            assert!((d.distance - exact.distance(goal)).abs() < 1e-9);
            assert!((a.distance - d.distance).abs() < 1e-9, "seed {seed}");
        }
    }

    #[tokio::test]
    async fn route_edges_were_discovered() {
        let g = generate_with(&mut StdRng::seed_from_u64(3), 40, Bounds::default()).unwrap();
        let (mut probe, _source) = bench_probe();
        let PathExit::Found(path) = dijkstra(&g, 0, g.goal(), &mut probe).await else {
            panic!("expected a path");
        };
        let last_search = probe
            .events()
            .iter()
            .rev()
            .find_map(|e| match e {
                algoscope_core::RunEvent::Search { edges, .. } => Some(edges.clone()),
                _ => None,
            })
            .unwrap();
        for w in path.route.windows(2) {
            let pair = (w[0].min(w[1]), w[0].max(w[1]));
            assert!(last_search.contains(&pair));
            assert!(g.has_edge(w[0], w[1]));
        }
    }

    #[tokio::test]
    async fn unreachable_goal_has_no_path() {
        let g = graph(&[(0.0, 0.0), (1.0, 0.0), (9.0, 9.0)], &[(0, 1)]);
        let (mut probe, _source) = bench_probe();
        assert_eq!(a_star(&g, 0, 2, &mut probe).await, PathExit::NoPath);
    }
}

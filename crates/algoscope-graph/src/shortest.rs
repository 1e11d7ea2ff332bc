//! Euclidean shortest paths.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::Graph;

/// Priority-queue entry ordered so that [`BinaryHeap`] pops the lowest cost.
/// Equal costs pop in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct MinCost {
    pub cost: f64,
    pub node: usize,
    pub seq: u64,
}

impl PartialEq for MinCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinCost {}

impl PartialOrd for MinCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinCost {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Distances and predecessors from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Dijkstra from `source` using Euclidean edge lengths.
    pub fn from_source(graph: &Graph, source: usize) -> Self {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        if source < n {
            dist[source] = 0.0;
            heap.push(MinCost { cost: 0.0, node: source, seq });
        }

        while let Some(MinCost { cost, node, .. }) = heap.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;
            for &next in graph.neighbors(node) {
                let alt = cost + graph.distance(node, next);
                if alt < dist[next] {
                    dist[next] = alt;
                    prev[next] = Some(node);
                    seq += 1;
                    heap.push(MinCost { cost: alt, node: next, seq });
                }
            }
        }

        Self { source, dist, prev }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance to `target`; infinite when unreachable.
    pub fn distance(&self, target: usize) -> f64 {
        self.dist.get(target).copied().unwrap_or(f64::INFINITY)
    }

    pub fn distances(&self) -> &[f64] {
        &self.dist
    }

    /// Node sequence from the source to `target`, if reachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.distance(target).is_finite() {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.prev[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest paths between every pair of nodes, one Dijkstra row per source.
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairs {
    rows: Vec<ShortestPaths>,
}

impl AllPairs {
    pub fn compute(graph: &Graph) -> Self {
        Self::from_rows((0..graph.node_count()).map(|s| ShortestPaths::from_source(graph, s)).collect())
    }

    /// Assemble from rows computed elsewhere; row `i` must have source `i`.
    pub fn from_rows(rows: Vec<ShortestPaths>) -> Self {
        debug_assert!(rows.iter().enumerate().all(|(i, r)| r.source == i));
        Self { rows }
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.rows[from].distance(to)
    }

    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.rows[from].path_to(to)
    }

    /// Whether every node reaches every other.
    pub fn is_complete(&self) -> bool {
        self.rows
            .first()
            .map_or(true, |row| row.dist.iter().all(|d| d.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn square() -> Graph {
        Graph::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            [(0, 1), (1, 2), (2, 3), (3, 0)],
        )
        .unwrap()
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinCost { cost: 3.0, node: 0, seq: 0 });
        heap.push(MinCost { cost: 1.0, node: 1, seq: 1 });
        heap.push(MinCost { cost: 1.0, node: 2, seq: 2 });
        assert_eq!(heap.pop().unwrap().node, 1);
        assert_eq!(heap.pop().unwrap().node, 2);
        assert_eq!(heap.pop().unwrap().node, 0);
    }

    #[test]
    fn square_opposite_corner() {
        let sp = ShortestPaths::from_source(&square(), 0);
        assert_eq!(sp.distance(2), 2.0);
        let path = sp.path_to(2).unwrap();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&2));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn unreachable_has_no_path() {
        let g = Graph::new(vec![Point::default(), Point::new(1.0, 0.0)], Vec::<(usize, usize)>::new()).unwrap();
        let sp = ShortestPaths::from_source(&g, 0);
        assert!(sp.distance(1).is_infinite());
        assert_eq!(sp.path_to(1), None);
        assert_eq!(sp.path_to(0), Some(vec![0]));
        assert!(!AllPairs::compute(&g).is_complete());
    }

    #[test]
    fn all_pairs_is_symmetric() {
        let ap = AllPairs::compute(&square());
        for a in 0..4 {
            for b in 0..4 {
                assert!((ap.distance(a, b) - ap.distance(b, a)).abs() < 1e-12);
            }
        }
        assert!(ap.is_complete());
    }
}

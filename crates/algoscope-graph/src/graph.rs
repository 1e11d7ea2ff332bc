//! Immutable undirected graph over planar points.

use std::collections::{BTreeSet, VecDeque};

use crate::error::{Error, Result};
use crate::point::Point;

/// Undirected edge, canonicalised so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    a: usize,
    b: usize,
}

impl EdgeKey {
    /// Canonicalise an unordered pair. The caller guarantees `x != y`.
    pub fn new(x: usize, y: usize) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn a(&self) -> usize {
        self.a
    }

    pub fn b(&self) -> usize {
        self.b
    }

    pub fn pair(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    pub fn touches(&self, node: usize) -> bool {
        self.a == node || self.b == node
    }
}

impl From<(usize, usize)> for EdgeKey {
    fn from((x, y): (usize, usize)) -> Self {
        EdgeKey::new(x, y)
    }
}

/// Nodes with planar coordinates and a deduplicated undirected edge set.
///
/// Edges only reference existing nodes. Nothing mutates a graph once built;
/// runs share it read-only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Graph {
    points: Vec<Point>,
    edges: Vec<EdgeKey>,
    #[cfg_attr(feature = "serde", serde(skip))]
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build a graph, validating and deduplicating the edges.
    pub fn new<I, E>(points: Vec<Point>, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeKey>,
    {
        let len = points.len();
        let mut set = BTreeSet::new();
        for edge in edges {
            let edge: EdgeKey = edge.into();
            if edge.b >= len {
                return Err(Error::EdgeOutOfRange { a: edge.a, b: edge.b, len });
            }
            if edge.a == edge.b {
                return Err(Error::SelfLoop(edge.a));
            }
            set.insert(edge);
        }

        let edges: Vec<EdgeKey> = set.into_iter().collect();
        let mut adjacency = vec![Vec::new(); len];
        for edge in &edges {
            adjacency[edge.a].push(edge.b);
            adjacency[edge.b].push(edge.a);
        }

        Ok(Self { points, edges, adjacency })
    }

    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, node: usize) -> Option<&Point> {
        self.points.get(node)
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    /// Neighbours of `node`, in edge-set order.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, x: usize, y: usize) -> bool {
        x != y && self.edges.binary_search(&EdgeKey::new(x, y)).is_ok()
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.points.len()
    }

    /// Error unless `node` exists.
    pub fn check_node(&self, node: usize) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange { node, len: self.points.len() })
        }
    }

    /// Straight-line distance between two nodes.
    #[inline]
    pub fn distance(&self, x: usize, y: usize) -> f64 {
        self.points[x].distance(&self.points[y])
    }

    /// Default start node for point-to-point searches.
    pub fn start(&self) -> usize {
        0
    }

    /// Default goal node: the last one.
    pub fn goal(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Sum of edge lengths along a node sequence.
    pub fn route_length(&self, route: &[usize]) -> f64 {
        route.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    /// Connected components as a label per node, labels in discovery order.
    pub fn component_labels(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.points.len()];
        let mut next = 0;
        let mut queue = VecDeque::new();
        for root in 0..self.points.len() {
            if labels[root] != usize::MAX {
                continue;
            }
            labels[root] = next;
            queue.push_back(root);
            while let Some(node) = queue.pop_front() {
                for &n in &self.adjacency[node] {
                    if labels[n] == usize::MAX {
                        labels[n] = next;
                        queue.push_back(n);
                    }
                }
            }
            next += 1;
        }
        labels
    }

    pub fn is_connected(&self) -> bool {
        self.component_labels().iter().all(|&l| l == 0)
    }
}

//! Visited set, discovered edges and predecessors shared by every search.

use std::collections::BTreeSet;

use algoscope_core::{EdgePair, Frame};
use algoscope_graph::EdgeKey;

/// Search progress over one graph.
///
/// Every node with a predecessor is also visited, and the discovered edge
/// set only grows.
#[derive(Debug, Clone)]
pub struct SearchState {
    seen: Vec<bool>,
    order: Vec<usize>,
    edges: BTreeSet<EdgeKey>,
    prev: Vec<Option<usize>>,
}

impl SearchState {
    pub fn new(node_count: usize) -> Self {
        Self {
            seen: vec![false; node_count],
            order: Vec::new(),
            edges: BTreeSet::new(),
            prev: vec![None; node_count],
        }
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.seen.get(node).copied().unwrap_or(false)
    }

    /// Mark `node` visited. Returns `false` if it already was.
    pub fn mark(&mut self, node: usize) -> bool {
        if self.is_visited(node) {
            return false;
        }
        self.seen[node] = true;
        self.order.push(node);
        true
    }

    /// Reach `to` from `from` for the first time, recording the edge and the
    /// predecessor. Returns `false` if `to` was already visited.
    pub fn discover(&mut self, from: usize, to: usize) -> bool {
        if !self.mark(to) {
            return false;
        }
        self.prev[to] = Some(from);
        self.edges.insert(EdgeKey::new(from, to));
        true
    }

    /// Point `to` at a better predecessor, visiting it if needed.
    pub fn relax(&mut self, from: usize, to: usize) {
        self.mark(to);
        self.prev[to] = Some(from);
        self.edges.insert(EdgeKey::new(from, to));
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.edges.insert(EdgeKey::new(a, b));
        }
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&EdgeKey::new(a, b))
    }

    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.prev.get(node).copied().flatten()
    }

    /// Visited nodes in discovery order.
    pub fn visited(&self) -> &[usize] {
        &self.order
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Follow predecessors back from `goal` to `start`.
    pub fn route_to(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        let mut route = vec![goal];
        let mut current = goal;
        while current != start {
            current = self.predecessor(current)?;
            route.push(current);
            if route.len() > self.seen.len() {
                return None;
            }
        }
        route.reverse();
        Some(route)
    }

    /// Discovered edges as canonical pairs.
    pub fn edges(&self) -> Vec<EdgePair> {
        self.edges.iter().map(EdgeKey::pair).collect()
    }

    pub fn frame(&self) -> Frame {
        Frame::Search {
            visited: self.order.clone(),
            edges: self.edges(),
        }
    }

    /// Tour order together with the edges discovered so far.
    pub fn tour_frame(&self, order: &[usize]) -> Frame {
        Frame::Tour {
            order: order.to_vec(),
            edges: self.edges(),
        }
    }
}

//! Per-run performance counters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters accumulated by one run.
///
/// Each run owns a fresh set. Values only grow while the run is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Relational comparisons between two elements (or two distances).
    pub comparisons: u64,
    /// Reads and writes touching the underlying storage.
    pub accesses: u64,
    /// Logical exchanges, counted once per exchange.
    pub swaps: u64,
    /// Nodes expanded by a graph search.
    pub visited: u64,
    /// Wall-clock duration, recorded at the end of a benchmark-paced run.
    #[serde(rename = "elapsedMillis")]
    pub elapsed_ms: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    #[inline]
    pub fn record_access(&mut self, n: u64) {
        self.accesses += n;
    }

    #[inline]
    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    #[inline]
    pub fn record_visit(&mut self) {
        self.visited += 1;
    }

    /// Record elapsed wall-clock time. Never moves backwards.
    pub fn record_elapsed(&mut self, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        if ms > self.elapsed_ms {
            self.elapsed_ms = ms;
        }
    }

    /// Whether the operation counters (ignoring time) match another set.
    pub fn same_counts(&self, other: &Metrics) -> bool {
        self.comparisons == other.comparisons
            && self.accesses == other.accesses
            && self.swaps == other.swaps
            && self.visited == other.visited
    }
}

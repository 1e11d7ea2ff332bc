//! Quicksort with Lomuto partitioning around the last element.
//!
//! Sub-ranges wait on an explicit stack, left before right. Frames publish
//! only the range being partitioned.
//!
//! Accounting: 1 access to read the pivot, 1 per element compared against
//! it, 4 per exchange. Self-exchanges are skipped and not counted.

use algoscope_core::{Frame, Probe, Reporter};

use crate::element::{keys, Element};
use crate::SortExit;

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let mut stack = Vec::new();
    if seq.len() > 1 {
        stack.push((0, seq.len() - 1));
    }
    while let Some((low, high)) = stack.pop() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        if low >= high {
            continue;
        }
        let Some(p) = partition(seq, low, high, probe).await else {
            return SortExit::Cancelled;
        };
        if p + 1 < high {
            stack.push((p + 1, high));
        }
        if p > low + 1 {
            stack.push((low, p - 1));
        }
    }
    SortExit::Sorted
}

/// Partition `seq[low..=high]`; returns the pivot's final index, or `None`
/// if cancelled part-way.
async fn partition<T: Element, R: Reporter>(
    seq: &mut [T],
    low: usize,
    high: usize,
    probe: &mut Probe<R>,
) -> Option<usize> {
    let pivot = seq[high];
    probe.access(1);
    let mut store = low;
    for j in low..high {
        if probe.is_cancelled() {
            return None;
        }
        probe.highlight(&[j, high]);
        probe.compare();
        probe.access(1);
        if seq[j] <= pivot {
            if store != j {
                seq.swap(store, j);
                probe.access(4);
                probe.swap();
            }
            store += 1;
        }
        probe.step(|| range(seq, low, high)).await;
    }
    if store != high {
        seq.swap(store, high);
        probe.access(4);
        probe.swap();
    }
    probe.step(|| range(seq, low, high)).await;
    Some(store)
}

fn range<T: Element>(seq: &[T], low: usize, high: usize) -> Frame {
    Frame::Range {
        offset: low,
        values: keys(&seq[low..=high]),
    }
}

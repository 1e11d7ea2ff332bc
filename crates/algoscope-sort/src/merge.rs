//! Top-down merge sort.
//!
//! The recursion is unrolled onto an explicit task stack so that stack depth
//! does not grow with the input. Each merge works on `seq[lo..hi]` through a
//! scratch buffer and only writes the range back once merged; published
//! frames show that range partially reassembled.
//!
//! Accounting: one access per element copied out, one per element written
//! back. Ties take from the left run, so the sort is stable.

use algoscope_core::{Frame, Probe, Reporter};

use crate::element::{keys, Element};
use crate::SortExit;

#[derive(Debug, Clone, Copy)]
enum Task {
    Split { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let mut stack = vec![Task::Split { lo: 0, hi: seq.len() }];
    while let Some(task) = stack.pop() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        match task {
            Task::Split { lo, hi } if hi - lo >= 2 => {
                let mid = lo + (hi - lo) / 2;
                stack.push(Task::Merge { lo, mid, hi });
                stack.push(Task::Split { lo: mid, hi });
                stack.push(Task::Split { lo, hi: mid });
            }
            Task::Split { .. } => {}
            Task::Merge { lo, mid, hi } => {
                if merge(seq, lo, mid, hi, probe).await.is_cancelled() {
                    return SortExit::Cancelled;
                }
            }
        }
    }
    SortExit::Sorted
}

async fn merge<T: Element, R: Reporter>(
    seq: &mut [T],
    lo: usize,
    mid: usize,
    hi: usize,
    probe: &mut Probe<R>,
) -> SortExit {
    let left = seq[lo..mid].to_vec();
    let right = seq[mid..hi].to_vec();
    probe.access((hi - lo) as u64);

    let mut merged = Vec::with_capacity(hi - lo);
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        probe.highlight(&[lo + i, mid + j]);
        probe.compare();
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
        probe
            .step(|| reassembly(lo, &merged, &left[i..], &right[j..]))
            .await;
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    seq[lo..hi].copy_from_slice(&merged);
    probe.access((hi - lo) as u64);
    probe
        .step(|| Frame::Range { offset: lo, values: keys(&seq[lo..hi]) })
        .await;
    SortExit::Sorted
}

/// Merged prefix followed by what remains of both runs.
fn reassembly<T: Element>(offset: usize, merged: &[T], left: &[T], right: &[T]) -> Frame {
    let values = merged
        .iter()
        .chain(left)
        .chain(right)
        .map(Element::key)
        .collect();
    Frame::Range { offset, values }
}

//! Insertion sort.
//!
//! Each element sinks left by adjacent exchanges until its left neighbour is
//! not greater, so the working copy stays a permutation at every step.
//! Accounting: 2 accesses per comparison, 4 per exchange.

use algoscope_core::{Probe, Reporter};

use crate::element::Element;
use crate::{full, SortExit};

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    for i in 1..seq.len() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        let mut j = i;
        while j > 0 {
            if probe.is_cancelled() {
                return SortExit::Cancelled;
            }
            probe.highlight(&[j - 1, j]);
            probe.compare();
            probe.access(2);
            if seq[j - 1] <= seq[j] {
                break;
            }
            seq.swap(j - 1, j);
            probe.access(4);
            probe.swap();
            j -= 1;
            probe.step(|| full(seq)).await;
        }
        probe.step(|| full(seq)).await;
    }
    SortExit::Sorted
}

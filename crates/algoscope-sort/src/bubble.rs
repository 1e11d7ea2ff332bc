//! Bubble sort.
//!
//! Accounting: 2 accesses per comparison of neighbours, 4 per exchange.

use algoscope_core::{Probe, Reporter};

use crate::element::Element;
use crate::{full, SortExit};

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let n = seq.len();
    for i in 0..n {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        for j in 0..n - i - 1 {
            if probe.is_cancelled() {
                return SortExit::Cancelled;
            }
            probe.highlight(&[j, j + 1]);
            probe.compare();
            probe.access(2);
            if seq[j] > seq[j + 1] {
                seq.swap(j, j + 1);
                probe.access(4);
                probe.swap();
            }
            probe.step(|| full(seq)).await;
        }
    }
    SortExit::Sorted
}

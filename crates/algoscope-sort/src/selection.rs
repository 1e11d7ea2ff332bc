//! Selection sort.
//!
//! Accounting: 2 accesses per comparison, 4 per exchange. Positions already
//! holding their minimum are not exchanged.

use algoscope_core::{Probe, Reporter};

use crate::element::Element;
use crate::{full, SortExit};

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let n = seq.len();
    for i in 0..n {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        let mut min = i;
        for j in i + 1..n {
            if probe.is_cancelled() {
                return SortExit::Cancelled;
            }
            probe.highlight(&[min, j]);
            probe.compare();
            probe.access(2);
            if seq[j] < seq[min] {
                min = j;
            }
            probe.step(|| full(seq)).await;
        }
        if min != i {
            seq.swap(i, min);
            probe.access(4);
            probe.swap();
        }
        probe.step(|| full(seq)).await;
    }
    SortExit::Sorted
}

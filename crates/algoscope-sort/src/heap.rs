//! Heapsort over a max-heap built in place.
//!
//! Sift-down is a loop rather than a recursion; it re-checks cancellation
//! each level. Accounting: 2 accesses per comparison, 4 per exchange.

use algoscope_core::{Probe, Reporter};

use crate::element::Element;
use crate::{full, SortExit};

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let n = seq.len();
    for root in (0..n / 2).rev() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        if sift_down(seq, root, n, probe).await.is_cancelled() {
            return SortExit::Cancelled;
        }
    }

    for end in (1..n).rev() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        probe.highlight(&[0, end]);
        seq.swap(0, end);
        probe.access(4);
        probe.swap();
        probe.step(|| full(seq)).await;
        if sift_down(seq, 0, end, probe).await.is_cancelled() {
            return SortExit::Cancelled;
        }
    }
    SortExit::Sorted
}

/// Restore the heap property below `root` within `seq[..len]`.
async fn sift_down<T: Element, R: Reporter>(
    seq: &mut [T],
    mut root: usize,
    len: usize,
    probe: &mut Probe<R>,
) -> SortExit {
    loop {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        let left = 2 * root + 1;
        if left >= len {
            return SortExit::Sorted;
        }
        let right = left + 1;
        let mut largest = root;

        probe.highlight(&[largest, left]);
        probe.compare();
        probe.access(2);
        if seq[left] > seq[largest] {
            largest = left;
        }
        if right < len {
            probe.highlight(&[largest, right]);
            probe.compare();
            probe.access(2);
            if seq[right] > seq[largest] {
                largest = right;
            }
        }
        if largest == root {
            return SortExit::Sorted;
        }

        probe.highlight(&[root, largest]);
        seq.swap(root, largest);
        probe.access(4);
        probe.swap();
        probe.step(|| full(seq)).await;
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bench_probe, every_step_probe};
    use algoscope_core::RunEvent;

    #[tokio::test]
    async fn sorts_heap_shapes() {
        for len in 0..20i64 {
            let (mut probe, _source) = bench_probe();
            let mut seq: Vec<i64> = (0..len).map(|v| (v * 7) % 11).collect();
            let mut expected = seq.clone();
            expected.sort();
            sort(&mut seq, &mut probe).await;
            assert_eq!(seq, expected, "len {len}");
        }
    }

    #[tokio::test]
    async fn comparisons_are_highlighted() {
        let (mut probe, _source) = every_step_probe();
        let mut seq = [1, 2, 3];
        sort(&mut seq, &mut probe).await;
        let highlights: Vec<Vec<usize>> = probe
            .events()
            .iter()
            .filter_map(|e| match e {
                RunEvent::Highlight { focus } => Some(focus.clone()),
                _ => None,
            })
            .collect();
        // Building the heap compares the root with both children first.
        assert_eq!(highlights[0], vec![0, 2]);
        assert!(highlights.iter().all(|f| f.len() == 2));
    }

    #[tokio::test]
    async fn single_element_has_no_work() {
        let (mut probe, _source) = bench_probe();
        let mut seq = [1];
        sort(&mut seq, &mut probe).await;
        assert_eq!(probe.metrics().comparisons, 0);
        assert_eq!(probe.metrics().swaps, 0);
    }
}

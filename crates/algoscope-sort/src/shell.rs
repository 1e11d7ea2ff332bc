//! Shell sort with the halving gap sequence `n/2, n/4, ..., 1`.
//!
//! Gapped insertion by exchanges. Accounting: 2 accesses per comparison,
//! 4 per exchange.

use algoscope_core::{Probe, Reporter};

use crate::element::Element;
use crate::{full, SortExit};

pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let n = seq.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            if probe.is_cancelled() {
                return SortExit::Cancelled;
            }
            let mut j = i;
            while j >= gap {
                if probe.is_cancelled() {
                    return SortExit::Cancelled;
                }
                probe.highlight(&[j - gap, j]);
                probe.compare();
                probe.access(2);
                if seq[j - gap] <= seq[j] {
                    break;
                }
                seq.swap(j - gap, j);
                probe.access(4);
                probe.swap();
                j -= gap;
                probe.step(|| full(seq)).await;
            }
            probe.step(|| full(seq)).await;
        }
        gap /= 2;
    }
    SortExit::Sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::bench_probe;

    #[tokio::test]
    async fn sorts_reversed() {
        let (mut probe, _source) = bench_probe();
        let mut seq: Vec<i64> = (0..50).rev().collect();
        sort(&mut seq, &mut probe).await;
        assert_eq!(seq, (0..50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn single_element_is_untouched() {
        let (mut probe, _source) = bench_probe();
        let mut seq = [9];
        assert_eq!(sort(&mut seq, &mut probe).await, SortExit::Sorted);
        assert_eq!(probe.metrics().comparisons, 0);
    }
}

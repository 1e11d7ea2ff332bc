//! Counting sort.
//!
//! Non-comparative: no comparison is ever recorded. Three linear passes
//! (count, prefix sum, redistribute) each highlight a sequence position: the
//! element counted, the last output slot of the bucket just summed, and the
//! slot being filled. The sorted output lives in a scratch buffer and is
//! committed to the sequence in one write, so a cancelled run leaves the
//! input untouched. Keys spanning more than [`MAX_KEY_SPAN`] buckets are
//! refused before anything is allocated.
//!
//! Accounting: 1 access per element counted, 2 per element redistributed,
//! `n` for the final commit.

use algoscope_core::{Frame, Probe, Reporter};

use crate::element::{keys, Element};
use crate::{full, SortExit};

/// Largest key span (`max - min + 1`) counting sort will allocate buckets for.
pub const MAX_KEY_SPAN: u64 = 1 << 24;

/// Key span of `seq`, or `None` when empty.
pub fn key_span<T: Element>(seq: &[T]) -> Option<u64> {
    let min = seq.iter().map(Element::key).min()?;
    let max = seq.iter().map(Element::key).max()?;
    Some((max as i128 - min as i128 + 1).min(u64::MAX as i128) as u64)
}

/// Sort `seq`, or return [`SortExit::KeySpanTooWide`] when its keys span
/// more than [`MAX_KEY_SPAN`] values.
pub async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
    let n = seq.len();
    let Some(span) = key_span(seq) else {
        return SortExit::Sorted;
    };
    if span > MAX_KEY_SPAN {
        return SortExit::KeySpanTooWide { span };
    }
    let min = seq.iter().map(Element::key).min().unwrap_or_default();
    let bucket = |v: &T| (v.key() - min) as usize;

    let mut counts = vec![0usize; span as usize];
    for i in 0..n {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        probe.highlight(&[i]);
        counts[bucket(&seq[i])] += 1;
        probe.access(1);
        probe.step(|| full(seq)).await;
    }

    for b in 1..counts.len() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        counts[b] += counts[b - 1];
        if let Some(last) = counts[b].checked_sub(1) {
            probe.highlight(&[last]);
        }
        probe.step(|| full(seq)).await;
    }

    let mut output = seq.to_vec();
    for i in (0..n).rev() {
        if probe.is_cancelled() {
            return SortExit::Cancelled;
        }
        let b = bucket(&seq[i]);
        counts[b] -= 1;
        output[counts[b]] = seq[i];
        probe.access(2);
        probe.highlight(&[counts[b]]);
        probe.step(|| Frame::Full(keys(&output))).await;
    }

    seq.copy_from_slice(&output);
    probe.access(n as u64);
    probe.step(|| full(seq)).await;
    SortExit::Sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bench_probe, every_step_probe};
    use algoscope_core::RunEvent;

    #[tokio::test]
    async fn sorts_without_comparisons() {
        let (mut probe, _source) = bench_probe();
        let mut seq = [150, 1, 75, 1, 2];
        sort(&mut seq, &mut probe).await;
        assert_eq!(seq, [1, 1, 2, 75, 150]);
        assert_eq!(probe.metrics().comparisons, 0);
        assert_eq!(probe.metrics().swaps, 0);
    }

    #[tokio::test]
    async fn handles_negative_keys() {
        let (mut probe, _source) = bench_probe();
        let mut seq = [0i32, -3, 2, -3];
        sort(&mut seq, &mut probe).await;
        assert_eq!(seq, [-3, -3, 0, 2]);
    }

    #[tokio::test]
    async fn refuses_keys_wider_than_the_bucket_limit() {
        let (mut probe, _source) = bench_probe();
        let mut seq = [i64::MIN, 0, i64::MAX];
        let exit = sort(&mut seq, &mut probe).await;
        assert_eq!(exit, SortExit::KeySpanTooWide { span: u64::MAX });
        assert_eq!(seq, [i64::MIN, 0, i64::MAX]);
        assert!(probe.events().is_empty());

        let (mut probe, _source) = bench_probe();
        let mut seq = [0, MAX_KEY_SPAN as i64];
        assert_eq!(
            sort(&mut seq, &mut probe).await,
            SortExit::KeySpanTooWide { span: MAX_KEY_SPAN + 1 }
        );
    }

    #[tokio::test]
    async fn highlights_stay_within_the_sequence() {
        let (mut probe, _source) = every_step_probe();
        let mut seq = [900, 3, 450, 3];
        sort(&mut seq, &mut probe).await;
        let focus: Vec<usize> = probe
            .events()
            .iter()
            .filter_map(|e| match e {
                RunEvent::Highlight { focus } => Some(focus.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert!(!focus.is_empty());
        assert!(focus.iter().all(|&i| i < seq.len()));
    }

    #[test]
    fn span_of_sequence() {
        assert_eq!(key_span::<i64>(&[]), None);
        assert_eq!(key_span(&[5, 5]), Some(1));
        assert_eq!(key_span(&[-2, 3]), Some(6));
        assert_eq!(key_span(&[i64::MIN, i64::MAX]), Some(u64::MAX));
    }
}

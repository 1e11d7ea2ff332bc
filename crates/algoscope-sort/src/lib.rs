//! Algoscope Sort
//!
//! Eight sorting algorithms written as observable, interruptible processes.
//!
//! Every algorithm has the same shape:
//!
//! ```ignore
//! async fn sort<T: Element, R: Reporter>(seq: &mut [T], probe: &mut Probe<R>) -> SortExit
//! ```
//!
//! It sorts `seq` in place, records its work through the [`Probe`], publishes
//! frames on the probe's cadence and returns [`SortExit::Cancelled`] as soon
//! as it sees the cancellation flag at a loop head. A cancelled sequence is
//! always a permutation of its input.
//!
//! Comparisons are counted only when two elements are actually compared, so
//! counting sort reports none. Swaps count once per exchange. Access
//! multipliers are documented per module.

use std::fmt;
use std::str::FromStr;

use algoscope_core::{Error, Frame, Probe, Reporter};
use serde::{Deserialize, Serialize};

pub mod bubble;
pub mod counting;
mod element;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;
pub mod shell;

pub use element::{is_sorted, keys, Element};

/// How a sort returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortExit {
    Sorted,
    Cancelled,
    /// Counting sort refused keys spanning more than
    /// [`counting::MAX_KEY_SPAN`] buckets. The sequence is untouched.
    KeySpanTooWide { span: u64 },
}

impl SortExit {
    pub fn is_cancelled(self) -> bool {
        self == SortExit::Cancelled
    }
}

pub(crate) fn full<T: Element>(seq: &[T]) -> Frame {
    Frame::Full(keys(seq))
}

/// The sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Shell,
    Counting,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 8] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
        SortAlgorithm::Shell,
        SortAlgorithm::Counting,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Heap => "heap",
            SortAlgorithm::Shell => "shell",
            SortAlgorithm::Counting => "counting",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Heap => "Heap Sort",
            SortAlgorithm::Shell => "Shell Sort",
            SortAlgorithm::Counting => "Counting Sort",
        }
    }

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble
                | SortAlgorithm::Insertion
                | SortAlgorithm::Merge
                | SortAlgorithm::Counting
        )
    }

    pub fn is_comparison_based(self) -> bool {
        self != SortAlgorithm::Counting
    }

    pub fn complexity(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "O(n^2) time, O(1) space",
            SortAlgorithm::Selection => "O(n^2) time, O(1) space",
            SortAlgorithm::Insertion => "O(n^2) time, O(n) on nearly sorted input, O(1) space",
            SortAlgorithm::Merge => "O(n log n) time, O(n) space",
            SortAlgorithm::Quick => "O(n log n) average, O(n^2) worst, O(log n) space",
            SortAlgorithm::Heap => "O(n log n) time, O(1) space",
            SortAlgorithm::Shell => "O(n^2) worst case with halving gaps, O(1) space",
            SortAlgorithm::Counting => "O(n + k) time and space for key span k",
        }
    }

    /// Run this algorithm over `seq`.
    pub async fn run<T: Element, R: Reporter>(self, seq: &mut [T], probe: &mut Probe<R>) -> SortExit {
        match self {
            SortAlgorithm::Bubble => bubble::sort(seq, probe).await,
            SortAlgorithm::Selection => selection::sort(seq, probe).await,
            SortAlgorithm::Insertion => insertion::sort(seq, probe).await,
            SortAlgorithm::Merge => merge::sort(seq, probe).await,
            SortAlgorithm::Quick => quick::sort(seq, probe).await,
            SortAlgorithm::Heap => heap::sort(seq, probe).await,
            SortAlgorithm::Shell => shell::sort(seq, probe).await,
            SortAlgorithm::Counting => counting::sort(seq, probe).await,
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown sorting algorithm: {s}")))
    }
}

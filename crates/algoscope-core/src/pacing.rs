//! Pacing tiers and the suspension they impose between published steps.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::error::Error;

/// User-selectable speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceTier {
    /// No artificial delay; elapsed time measures the algorithm alone.
    Benchmark,
    /// 1ms pause every 100 steps
    Extreme,
    /// 10ms pause every 10 steps
    Fast,
    /// 10ms pause every 5 steps
    Intermediate,
    /// 100ms pause after every step
    Slow,
}

impl PaceTier {
    /// All tiers, fastest first.
    pub const ALL: [PaceTier; 5] = [
        PaceTier::Benchmark,
        PaceTier::Extreme,
        PaceTier::Fast,
        PaceTier::Intermediate,
        PaceTier::Slow,
    ];

    /// The `(step_delay, emit_every)` pair for this tier.
    pub fn pace(self) -> Pace {
        let (delay_ms, every) = match self {
            PaceTier::Benchmark => (0, 1000),
            PaceTier::Extreme => (1, 100),
            PaceTier::Fast => (10, 10),
            PaceTier::Intermediate => (10, 5),
            PaceTier::Slow => (100, 1),
        };
        Pace::new(Duration::from_millis(delay_ms), every)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaceTier::Benchmark => "benchmark",
            PaceTier::Extreme => "extreme",
            PaceTier::Fast => "fast",
            PaceTier::Intermediate => "intermediate",
            PaceTier::Slow => "slow",
        }
    }
}

impl fmt::Display for PaceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaceTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaceTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown pace tier: {s}")))
    }
}

/// Pacing controller: how long to pause, and how often to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    step_delay: Duration,
    emit_every: NonZeroU64,
}

impl Pace {
    /// Create a pace. An `emit_every` of zero is clamped to one.
    pub fn new(step_delay: Duration, emit_every: u64) -> Self {
        Self {
            step_delay,
            emit_every: NonZeroU64::new(emit_every).unwrap_or(NonZeroU64::MIN),
        }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn emit_every(&self) -> u64 {
        self.emit_every.get()
    }

    /// Zero delay: pure benchmarking, wall-clock time excludes pacing.
    pub fn is_benchmark(&self) -> bool {
        self.step_delay.is_zero()
    }

    /// True iff `step_index` falls on the publishing cadence.
    #[inline]
    pub fn should_emit(&self, step_index: u64) -> bool {
        step_index % self.emit_every.get() == 0
    }

    /// Suspend for the step delay.
    ///
    /// With a zero delay there is no timed pause, only a yield back to the
    /// scheduler so that a benchmark run stays cancellable on any runtime.
    /// A cancellation request cuts a timed pause short.
    pub async fn suspend(&self, token: &CancellationToken) {
        if self.step_delay.is_zero() {
            tokio::task::yield_now().await;
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(self.step_delay) => {}
            _ = token.cancelled() => {}
        }
    }
}

impl From<PaceTier> for Pace {
    fn from(tier: PaceTier) -> Self {
        tier.pace()
    }
}

//! The instrumentation handle passed into every algorithm body.
//!
//! A [`Probe`] bundles the run's [`Reporter`], its [`SnapshotEmitter`] and its
//! [`CancellationToken`]. Algorithms record work through it on every step and
//! call [`Probe::step`] at their publishing checkpoints; the probe decides
//! whether the step is published and whether to pause.

use std::time::{Duration, Instant};

use crate::cancel::CancellationToken;
use crate::emitter::SnapshotEmitter;
use crate::events::Frame;
use crate::metrics::Metrics;
use crate::pacing::Pace;
use crate::reporter::Reporter;

pub struct Probe<R> {
    reporter: R,
    emitter: SnapshotEmitter,
    token: CancellationToken,
    started: Instant,
}

impl<R: Reporter> Probe<R> {
    pub fn new(reporter: R, pace: Pace, token: CancellationToken) -> Self {
        Self {
            reporter,
            emitter: SnapshotEmitter::new(pace),
            token,
            started: Instant::now(),
        }
    }

    /// Polled at loop heads and recursion entries.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[inline]
    pub fn compare(&mut self) {
        self.reporter.record_comparison();
    }

    #[inline]
    pub fn access(&mut self, n: u64) {
        self.reporter.record_access(n);
    }

    #[inline]
    pub fn swap(&mut self) {
        self.reporter.record_swap();
    }

    #[inline]
    pub fn visit(&mut self) {
        self.reporter.record_visit();
    }

    #[inline]
    pub fn highlight(&mut self, focus: &[usize]) {
        self.reporter.highlight(focus);
    }

    /// Count one step. On the publishing cadence, build the frame, publish it
    /// and suspend for the step delay.
    pub async fn step<F>(&mut self, frame: F)
    where
        F: FnOnce() -> Frame,
    {
        if self.emitter.advance() {
            self.reporter.publish(frame());
            self.emitter.pace().suspend(&self.token).await;
        }
    }

    /// Publish regardless of cadence, then suspend.
    pub async fn flush(&mut self, frame: Frame) {
        self.emitter.note_forced();
        self.reporter.publish(frame);
        self.emitter.pace().suspend(&self.token).await;
    }

    /// Publish without counting a step or pausing.
    pub fn publish_now(&mut self, frame: Frame) {
        self.emitter.note_forced();
        self.reporter.publish(frame);
    }

    pub fn metrics(&self) -> &Metrics {
        self.reporter.metrics()
    }

    pub fn pace(&self) -> &Pace {
        self.emitter.pace()
    }

    pub fn steps(&self) -> u64 {
        self.emitter.step()
    }

    /// Restart the elapsed-time clock, once the run actually begins.
    pub fn restart_clock(&mut self) {
        self.started = Instant::now();
    }

    /// Let other tasks run without counting a step or publishing.
    pub async fn yield_now(&mut self) {
        tokio::task::yield_now().await;
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationSource;
    use crate::events::RunEvent;
    use crate::reporter::EventReporter;

    fn probe(every: u64) -> (Probe<EventReporter<Vec<RunEvent>>>, CancellationSource) {
        let source = CancellationSource::new();
        let probe = Probe::new(
            EventReporter::new(Vec::new()),
            Pace::new(Duration::ZERO, every),
            source.token(),
        );
        (probe, source)
    }

    #[tokio::test]
    async fn step_publishes_on_cadence_only() {
        let (mut probe, _source) = probe(2);
        let mut built = 0;
        for _ in 0..5 {
            probe
                .step(|| {
                    built += 1;
                    Frame::Full(vec![])
                })
                .await;
        }
        assert_eq!(built, 2);
        assert_eq!(probe.steps(), 5);
        let states = probe
            .into_reporter()
            .into_sink()
            .into_iter()
            .filter(|e| matches!(e, RunEvent::State { .. }))
            .count();
        assert_eq!(states, 2);
    }

    #[tokio::test]
    async fn flush_always_publishes() {
        let (mut probe, _source) = probe(1000);
        probe.flush(Frame::Full(vec![1])).await;
        let events = probe.into_reporter().into_sink();
        assert_eq!(events[0], RunEvent::State { values: vec![1] });
    }

    #[test]
    fn restart_clock_excludes_earlier_waiting() {
        let (mut probe, _source) = probe(1);
        std::thread::sleep(Duration::from_millis(30));
        let waited = probe.elapsed();
        probe.restart_clock();
        assert!(waited >= Duration::from_millis(30));
        assert!(probe.elapsed() < waited);
    }

    #[test]
    fn counters_go_through_reporter() {
        let (mut probe, source) = probe(1);
        probe.compare();
        probe.access(2);
        probe.swap();
        assert_eq!(probe.metrics().comparisons, 1);
        assert_eq!(probe.metrics().accesses, 2);
        assert_eq!(probe.metrics().swaps, 1);
        assert!(!probe.is_cancelled());
        source.cancel();
        assert!(probe.is_cancelled());
    }
}

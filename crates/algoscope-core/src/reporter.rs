//! The capability set every algorithm reports through.

use tokio::sync::mpsc;

use crate::events::{Frame, RunEvent};
use crate::metrics::Metrics;

/// Destination for run events.
pub trait EventSink: Send {
    fn send(&mut self, event: RunEvent);
}

impl EventSink for mpsc::UnboundedSender<RunEvent> {
    fn send(&mut self, event: RunEvent) {
        // A dropped observer must not stop the run.
        if mpsc::UnboundedSender::send(self, event).is_err() {
            tracing::trace!("observer dropped, discarding event");
        }
    }
}

impl EventSink for Vec<RunEvent> {
    fn send(&mut self, event: RunEvent) {
        self.push(event);
    }
}

/// Capabilities an algorithm body uses to report its work.
pub trait Reporter: Send {
    fn record_comparison(&mut self);
    fn record_access(&mut self, n: u64);
    fn record_swap(&mut self);
    fn record_visit(&mut self);
    /// Replace the focus set. An empty slice marks it inactive.
    fn highlight(&mut self, focus: &[usize]);
    /// Publish a frame to the observer.
    fn publish(&mut self, frame: Frame);
    fn metrics(&self) -> &Metrics;
}

/// Reporter that owns the run's counters and forwards to an [`EventSink`].
///
/// The focus set is only held locally and goes out with each published
/// frame, followed by the current counters.
#[derive(Debug)]
pub struct EventReporter<S> {
    metrics: Metrics,
    focus: Vec<usize>,
    sink: S,
}

impl<S: EventSink> EventReporter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            metrics: Metrics::new(),
            focus: Vec::new(),
            sink,
        }
    }

    pub fn focus(&self) -> &[usize] {
        &self.focus
    }

    pub fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    /// Send an event straight to the sink.
    pub fn emit(&mut self, event: RunEvent) {
        self.sink.send(event);
    }

    /// Send the current counters.
    pub fn emit_metrics(&mut self) {
        self.sink.send(RunEvent::Metrics(self.metrics));
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: EventSink> Reporter for EventReporter<S> {
    #[inline]
    fn record_comparison(&mut self) {
        self.metrics.record_comparison();
    }

    #[inline]
    fn record_access(&mut self, n: u64) {
        self.metrics.record_access(n);
    }

    #[inline]
    fn record_swap(&mut self) {
        self.metrics.record_swap();
    }

    #[inline]
    fn record_visit(&mut self) {
        self.metrics.record_visit();
    }

    fn highlight(&mut self, focus: &[usize]) {
        self.focus.clear();
        self.focus.extend_from_slice(focus);
    }

    fn publish(&mut self, frame: Frame) {
        self.sink.send(frame.into());
        self.sink.send(RunEvent::Highlight {
            focus: self.focus.clone(),
        });
        self.sink.send(RunEvent::Metrics(self.metrics));
    }

    fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_sends_frame_focus_and_counters() {
        let mut reporter = EventReporter::new(Vec::new());
        reporter.record_comparison();
        reporter.highlight(&[2, 3]);
        reporter.publish(Frame::Full(vec![1, 2]));

        let events = reporter.into_sink();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], RunEvent::State { values: vec![1, 2] });
        assert_eq!(events[1], RunEvent::Highlight { focus: vec![2, 3] });
        match &events[2] {
            RunEvent::Metrics(m) => assert_eq!(m.comparisons, 1),
            other => panic!("expected metrics, got {other:?}"),
        }
    }

    #[test]
    fn highlight_overwrites_previous_focus() {
        let mut reporter = EventReporter::new(Vec::new());
        reporter.highlight(&[1, 2]);
        reporter.highlight(&[7]);
        assert_eq!(reporter.focus(), &[7]);
        reporter.highlight(&[]);
        assert!(reporter.focus().is_empty());
    }

    #[test]
    fn dropped_channel_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut reporter = EventReporter::new(tx);
        reporter.publish(Frame::Full(vec![]));
    }
}

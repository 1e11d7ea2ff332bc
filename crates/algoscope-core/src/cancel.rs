//! Cooperative cancellation for algorithm runs.
//!
//! A run receives a [`CancellationToken`] and polls
//! [`is_cancelled`](CancellationToken::is_cancelled) at the top of every loop
//! iteration that can do unbounded work. The control side keeps the matching
//! [`CancellationSource`] and calls [`cancel`](CancellationSource::cancel)
//! from any thread. Nothing is interrupted forcibly: the algorithm notices the
//! flag at its next checkpoint and returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Read-only view of a cancellation flag, handed to running algorithms.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

/// The control handle that requests cancellation.
///
/// Dropping the source does not cancel its tokens.
#[derive(Debug)]
pub struct CancellationSource {
    inner: Arc<Inner>,
}

impl CancellationSource {
    /// Create a source whose tokens start uncancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Obtain a token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            tracing::debug!("cancellation requested");
            self.inner.notify.notify_waiters();
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// Returns `true` once cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolve once cancellation has been requested.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a concurrent cancel cannot slip between.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn token_starts_uncancelled() {
        let source = CancellationSource::new();
        assert!(!source.token().is_cancelled());
        assert!(!source.is_cancelled());
    }

    #[test]
    fn cancel_reaches_every_clone() {
        let source = CancellationSource::new();
        let a = source.token();
        let b = a.clone();
        source.cancel();
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let source = CancellationSource::new();
        source.cancel();
        source.cancel();
        assert!(source.token().is_cancelled());
    }

    #[test]
    fn dropping_source_does_not_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        drop(source);
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_future_wakes_on_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        let waiter = tokio::spawn(async move { token.cancelled().await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        source.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_future_is_ready_when_already_cancelled() {
        let source = CancellationSource::new();
        source.cancel();
        tokio::time::timeout(Duration::from_millis(100), source.token().cancelled())
            .await
            .expect("already cancelled");
    }
}

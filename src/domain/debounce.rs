//! Cancellable debounce timer.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Holds the latest value of a rapidly changing input until it has stayed
/// unchanged for the quiescence window.
///
/// There is at most one pending value. [`Debouncer::push`] replaces it and
/// restarts the window; [`Debouncer::cancel`] discards it. The timer only runs
/// while [`Debouncer::settled`] is being awaited, so dropping the debouncer (or
/// the future) can never deliver a stale value afterwards.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces the pending value and restarts the quiescence window.
    pub fn push(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Discards the pending value, if any, and returns it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the pending value to settle and takes it.
    ///
    /// Returns `None` immediately when nothing is pending. Cancel-safe: if the
    /// future is dropped before the deadline, the value stays pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref()?.0;
        sleep_until(deadline).await;
        self.cancel()
    }
}

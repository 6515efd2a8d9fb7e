//! Time-bounded, cancellable futures.
//!
//! The losing side of the race is dropped, not awaited: a slow hardware read
//! that misses its deadline is discarded.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How a bounded operation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounded<T> {
    Completed(T),
    TimedOut,
    Cancelled,
}

impl<T> Bounded<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Bounded::Completed(value) => Some(value),
            Bounded::TimedOut | Bounded::Cancelled => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Bounded::TimedOut)
    }
}

/// Run `operation` until it completes, `limit` elapses, or `cancel` fires.
/// Cancellation wins ties, then completion.
pub async fn run_bounded<F>(
    operation: F,
    limit: Duration,
    cancel: &CancellationToken,
) -> Bounded<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Bounded::Cancelled,
        output = operation => Bounded::Completed(output),
        _ = tokio::time::sleep(limit) => Bounded::TimedOut,
    }
}

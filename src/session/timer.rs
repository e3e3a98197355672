//! Delayed opponent moves.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A scheduled callback. Cancelled on `cancel()` or drop.
#[derive(Debug)]
pub struct PendingMove {
    handle: JoinHandle<()>,
}

impl PendingMove {
    /// Abort the callback if it has not run yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the callback ran or was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PendingMove {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `callback` after `delay` on the current tokio runtime.
///
/// Must be called from within a runtime.
pub fn schedule_opponent_move<F>(delay: Duration, callback: F) -> PendingMove
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
    PendingMove { handle }
}

//! Controller-owned task scope with explicit cancellation.
//!
//! Each controller owns a [`ControllerScope`] and spawns its observation loop
//! and fire-and-forget work on it. Dropping the scope (with the controller)
//! cancels every outstanding task: pending asynchronous work is abandoned
//! without side effects beyond what already started executing.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner handle for a controller's background tasks.
///
/// Wraps a watch-channel cancellation signal. Work spawned through
/// [`ControllerScope::spawn`] races against the signal and is dropped as soon
/// as the scope is cancelled or dropped.
#[derive(Debug)]
pub struct ControllerScope {
    cancel_tx: watch::Sender<bool>,
}

impl ControllerScope {
    /// Create a new, un-cancelled scope.
    #[must_use]
    pub fn new() -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self { cancel_tx }
    }

    /// A token observing this scope's cancellation signal.
    #[must_use]
    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            cancel_rx: self.cancel_tx.subscribe(),
        }
    }

    /// Spawn a task tied to this scope.
    ///
    /// The future is dropped at the first await point once the scope is
    /// cancelled.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut token = self.token();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = future => {}
            }
        })
    }

    /// Cancel all tasks spawned on this scope.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }
}

impl Default for ControllerScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ControllerScope {
    fn drop(&mut self) {
        let _ = self.cancel_tx.send(true);
    }
}

/// Cancellation token handed to scoped tasks.
#[derive(Debug, Clone)]
pub struct ScopeToken {
    cancel_rx: watch::Receiver<bool>,
}

impl ScopeToken {
    /// Resolves once the owning scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        // A closed channel means the scope is gone; treat it as cancelled.
        let _ = self.cancel_rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Whether the owning scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[test]
    fn token_is_pending_until_cancel() {
        let scope = ControllerScope::new();
        let mut token = scope.token();
        assert!(!token.is_cancelled());

        let mut waiting = tokio_test::task::spawn(async move { token.cancelled().await });
        assert!(waiting.poll().is_pending());

        scope.cancel();
        assert!(waiting.poll().is_ready());
    }

    #[tokio::test]
    async fn drop_cancels_spawned_work() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let scope = ControllerScope::new();
        let handle = scope.spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            flag.store(true, Ordering::Release);
        });

        drop(scope);
        #[allow(clippy::unwrap_used)] // Test will fail loudly on a join error
        handle.await.unwrap();
        assert!(!finished.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn spawned_work_runs_to_completion_without_cancel() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let scope = ControllerScope::new();
        let handle = scope.spawn(async move {
            flag.store(true, Ordering::Release);
        });

        #[allow(clippy::unwrap_used)] // Test will fail loudly on a join error
        handle.await.unwrap();
        assert!(finished.load(Ordering::Acquire));
    }
}

//! Awaiting helpers for channel-driven controller tests.
//!
//! Watch channels coalesce intermediate values and broadcast channels drop
//! events for absent subscribers, so tests assert on *eventual* state and on
//! events received by receivers attached before the action under test. These
//! helpers wrap the channel waits with timeouts so a wrong assertion fails
//! fast instead of hanging the suite.

use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// How long a test waits for an expected emission before failing.
const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a test watches for an emission that must *not* arrive.
const QUIET_TIMEOUT: Duration = Duration::from_millis(100);

/// Wait until the watch channel's value satisfies the predicate, then return
/// that value.
///
/// The current value counts; the helper does not require a fresh emission.
///
/// # Panics
///
/// Panics when the predicate is not satisfied within the timeout or the
/// sender is dropped.
#[allow(clippy::expect_used)] // Panics: Test will fail if the state never arrives
pub async fn wait_for_state<T, F>(rx: &mut watch::Receiver<T>, predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let value = tokio::time::timeout(WAIT_TIMEOUT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("state sender dropped");
    value.clone()
}

/// Receive the next broadcast event.
///
/// # Panics
///
/// Panics when no event arrives within the timeout or the channel lagged or
/// closed.
#[allow(clippy::expect_used)] // Panics: Test will fail if the event never arrives
pub async fn next_event<T: Clone + Debug>(rx: &mut broadcast::Receiver<T>) -> T {
    tokio::time::timeout(WAIT_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed or lagged")
}

/// Assert that no broadcast event arrives within a short quiet period.
///
/// # Panics
///
/// Panics when an event does arrive.
#[allow(clippy::panic)] // Panics: Test will fail if an unexpected event arrives
pub async fn expect_no_event<T: Clone + Debug>(rx: &mut broadcast::Receiver<T>) {
    if let Ok(Ok(event)) = tokio::time::timeout(QUIET_TIMEOUT, rx.recv()).await {
        panic!("expected no event, got {event:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_for_state_accepts_current_value() {
        let (tx, mut rx) = watch::channel(5_u32);
        let value = wait_for_state(&mut rx, |v| *v == 5).await;
        assert_eq!(value, 5);
        drop(tx);
    }

    #[tokio::test]
    async fn wait_for_state_sees_later_emission() {
        let (tx, mut rx) = watch::channel(0_u32);
        tokio::spawn(async move {
            tx.send_replace(1);
            // Keep the sender alive until the waiter has seen the value.
            tokio::time::sleep(Duration::from_millis(200)).await;
        });
        let value = wait_for_state(&mut rx, |v| *v == 1).await;
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn next_event_returns_sent_event() {
        let (tx, mut rx) = broadcast::channel(4);
        let _ = tx.send("hello");
        assert_eq!(next_event(&mut rx).await, "hello");
    }

    #[tokio::test]
    async fn expect_no_event_passes_on_silence() {
        let (tx, mut rx) = broadcast::channel::<&str>(4);
        expect_no_event(&mut rx).await;
        drop(tx);
    }
}

//! Cooperative cancellation handle.

use std::{
    pin::pin,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::Notify;

/// Clonable handle that tells an in-flight confirmation poll to stop
/// waiting. Triggering it is one-way and idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    /// Shared cancellation state.
    inner: Arc<CancelState>,
}

/// Shared flag plus wakeup for waiters.
#[derive(Debug, Default)]
struct CancelState {
    /// Set once, never cleared.
    cancelled: AtomicBool,
    /// Wakes tasks parked in [`CancelHandle::cancelled`].
    notify: Notify,
}

impl CancelHandle {
    /// Creates an untriggered handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers cancellation and wakes all waiters.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Returns true once cancellation has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once cancellation is triggered; immediately when it already
    /// was.
    pub async fn cancelled(&self) {
        let mut notified = pin!(self.inner.notify.notified());
        loop {
            if self.is_cancelled() {
                return;
            }
            // Register interest before the flag re-check so a concurrent
            // cancel() cannot slip between check and park.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.as_mut().await;
            notified.set(self.inner.notify.notified());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_starts_untriggered() {
        let handle = CancelHandle::new();
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_when_pretriggered() {
        let handle = CancelHandle::new();
        handle.cancel();
        handle.cancelled().await;
    }

    #[tokio::test]
    async fn cancelled_resolves_after_trigger_from_another_task() {
        let handle = CancelHandle::new();
        let trigger = handle.clone();
        let waiter = tokio::spawn(async move { handle.cancelled().await });
        trigger.cancel();
        assert!(waiter.await.is_ok());
    }
}

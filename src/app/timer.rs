// SPDX-License-Identifier: GPL-3.0-only

//! Delayed messages
//!
//! A [`DeferredAction`] sends one message back into the update loop after a
//! delay. Dropping or cancelling it before the delay runs out aborts the send.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct DeferredAction {
    handle: JoinHandle<()>,
}

impl DeferredAction {
    /// Send `message` on `tx` once `delay` has passed
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<M>(delay: Duration, tx: UnboundedSender<M>, message: M) -> Self
    where
        M: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(message).is_err() {
                debug!("Deferred message dropped, receiver gone");
            }
        });
        Self { handle }
    }

    /// Whether the message has been sent (or the task aborted)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for DeferredAction {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _action = DeferredAction::schedule(Duration::from_millis(100), tx, 7u32);

        tokio::time::advance(Duration::from_millis(99)).await;
        settle().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(rx.try_recv().ok(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_send() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let action = DeferredAction::schedule(Duration::from_millis(100), tx, 7u32);
        action.cancel();

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_prevents_send() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(DeferredAction::schedule(Duration::from_millis(100), tx, 7u32));

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }
}

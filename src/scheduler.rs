//! Deferred tasks
//!
//! A one-shot action that runs after a delay on the tokio runtime.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to an action scheduled with [`DeferredTask::schedule`]
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
    delay: Duration,
}

impl DeferredTask {
    /// Run `action` once `delay` has elapsed.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        DeferredTask { handle, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Does nothing: no event can legally preempt a scheduled reset, so the
    /// task always runs to completion.
    pub fn cancel(&self) {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "cancel requested on deferred task, ignoring");
    }

    /// Wait for the action to finish.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "deferred task did not complete");
        }
    }
}

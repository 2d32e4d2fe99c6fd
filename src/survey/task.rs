//! Cancellable background work bound to a session's lifetime.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Cancellation signal shared between a session and the work it spawned.
///
/// Cancelling is idempotent; only the first call has an effect.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal cancellation. Returns `true` if this call did it.
    pub fn cancel(&self) -> bool {
        !self.tx.send_replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only ends on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// A spawned unit of work that stops when its token is cancelled.
///
/// Losing the race to the token drops the work future mid-flight. The
/// completion callback never runs once cancellation has been observed.
pub struct CancellableTask<T> {
    handle: JoinHandle<Option<T>>,
    token: CancelToken,
}

impl<T: Send + 'static> CancellableTask<T> {
    pub fn spawn<F, C>(runtime: &Handle, token: CancelToken, work: F, on_complete: C) -> Self
    where
        F: Future + Send + 'static,
        F::Output: Send,
        C: FnOnce(F::Output) -> T + Send + 'static,
    {
        let task_token = token.clone();
        let handle = runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => None,
                output = work => {
                    if task_token.is_cancelled() {
                        return None;
                    }
                    Some(on_complete(output))
                }
            }
        });
        Self { handle, token }
    }

    pub fn cancel(&self) -> bool {
        self.token.cancel()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task. `None` means it was cancelled before completing.
    pub async fn join(self) -> Option<T> {
        match self.handle.await {
            Ok(output) => output,
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::warn!("Cancellable task panicked: {}", e);
                }
                None
            }
        }
    }
}

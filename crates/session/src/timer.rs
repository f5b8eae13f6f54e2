//! Scoped timer helper
//!
//! Guarantees at most one pending timer per purpose: arming cancels the
//! previous timer, and dropping the owner cancels whatever is left.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// A single-slot timer
///
/// `arm` replaces any pending timer; `cancel` is idempotent. The armed future
/// runs only if the delay elapses before the next `arm`/`cancel`.
#[derive(Debug, Default)]
pub struct ScopedTimer {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ScopedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` after `delay`, cancelling any pending timer
    pub fn arm<F>(&self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        if let Some(previous) = self.handle.lock().replace(task) {
            previous.abort();
        }
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&self) {
        if let Some(task) = self.handle.lock().take() {
            task.abort();
        }
    }

    /// Is a timer currently pending?
    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Trailing-edge debounce over tokio tasks
//!
//! A burst of schedules inside the window runs the last task once, a full
//! window after the final schedule. Dropping a [`DebounceHandle`] aborts its
//! task wherever it is: still sleeping or already running.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Default quiet window before a scheduled fetch runs
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Cancellable scheduled task
///
/// Cancelling or dropping the handle aborts the task.
#[derive(Debug)]
#[must_use = "dropping a DebounceHandle cancels the scheduled task"]
pub struct DebounceHandle {
    task: JoinHandle<()>,
}

impl DebounceHandle {
    /// Run `task` after `delay` unless cancelled first
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        Self { task }
    }

    /// Abort the task
    #[inline]
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the task ran to completion or was aborted
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DebounceHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Holds at most one pending task; scheduling replaces it
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<DebounceHandle>>,
}

impl Debouncer {
    /// Debouncer with the given quiet window
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Quiet window
    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Run `task` after the window, cancelling whatever was pending
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.replace(DebounceHandle::after(self.window, task));
    }

    /// Run `task` now, cancelling whatever was pending
    pub fn trigger<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.replace(DebounceHandle::after(Duration::ZERO, task));
    }

    /// Cancel the pending task, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            trace!("cancelling pending task");
            handle.cancel();
        }
    }

    /// Whether a task is scheduled and has not finished
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn replace(&self, handle: DebounceHandle) {
        let previous = self.pending.lock().replace(handle);
        if let Some(previous) = previous {
            trace!("superseding pending task");
            previous.cancel();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

//! Completion tracking for dynamically growing work
//!
//! The crawl is done when every spawned task has terminated, including
//! tasks spawned while other tasks were expanding their links. This is the
//! join point the run blocks on; it must also resolve after cancellation,
//! once in-flight tasks have unwound.

use std::sync::Mutex;
use tokio::sync::Notify;

/// Counts spawned versus terminated tasks and wakes waiters when the two
/// meet.
///
/// `task_spawned` must be called before the task is handed to the
/// scheduler, and `task_finished` must be the task's final act on every
/// exit path, so the pending count can only reach zero when no task is
/// left that could spawn more work.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: Mutex<u64>,
    done: Notify,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task before it starts running
    pub fn task_spawned(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending += 1;
    }

    /// Marks a task terminated (completed, skipped, or aborted)
    pub fn task_finished(&self) {
        let mut pending = self.pending.lock().unwrap();
        debug_assert!(*pending > 0, "task_finished without matching task_spawned");
        *pending -= 1;
        if *pending == 0 {
            self.done.notify_waiters();
        }
    }

    /// Number of tasks not yet terminated
    pub fn pending(&self) -> u64 {
        *self.pending.lock().unwrap()
    }

    /// Resolves once all spawned tasks have terminated.
    ///
    /// Registering the waiter before checking the count closes the window
    /// where the last task finishes between the check and the await.
    pub async fn wait(&self) {
        loop {
            let notified = self.done.notified();
            if *self.pending.lock().unwrap() == 0 {
                return;
            }
            notified.await;
        }
    }
}

//! RAII scope keeping a burst of entries contiguous.

use std::cell::RefCell;

use parking_lot::ReentrantMutexGuard;

use crate::log_entry::LogEntry;

use super::{
    Logger,
    worker::{ProducerState, Shared},
};

/// Holds the producer lock until dropped.
///
/// Entries enqueued on this thread while the guard is alive are appended
/// back to back; other producers wait for the guard to go away. The consumer
/// is notified once, when the outermost guard ends. The guard cannot be sent
/// to another thread.
#[must_use = "the batch ends as soon as the guard is dropped"]
pub struct BatchGuard<'a> {
    logger: &'a Logger,
    lock: Option<ReentrantMutexGuard<'a, RefCell<ProducerState>>>,
}

impl<'a> BatchGuard<'a> {
    pub(super) fn new(logger: &'a Logger, shared: &'a Shared) -> Self {
        let lock = shared.producer.lock();
        lock.borrow_mut().batch_depth += 1;
        Self {
            logger,
            lock: Some(lock),
        }
    }

    /// Enqueue `entry` as part of this batch.
    pub fn enqueue(&self, entry: LogEntry) {
        self.logger.enqueue(entry);
    }

    /// End the batch. Equivalent to dropping the guard.
    pub fn end(self) {}
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        let Some(lock) = self.lock.take() else {
            return;
        };
        let outermost = {
            let mut state = lock.borrow_mut();
            state.batch_depth -= 1;
            state.batch_depth == 0
        };
        drop(lock);
        if outermost {
            self.logger.notify_consumer();
        }
    }
}

impl std::fmt::Debug for BatchGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchGuard").finish_non_exhaustive()
    }
}

//! Asynchronous dispatch engine.
//!
//! A [`Logger`] owns one consumer thread. Producers push entries into a
//! pending queue under a short critical section; the consumer swaps the
//! queue out and fans the entries out to every registered target whose
//! threshold they clear, without holding any lock producers need.

mod batch;
mod config;
mod global;
mod worker;

use std::{
    io,
    sync::{Arc, atomic::Ordering},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::bounded;
use log::warn;
use parking_lot::Mutex;
use thiserror::Error;

use crate::{log_entry::LogEntry, target::LogTarget};

pub use batch::BatchGuard;
pub use config::{
    DEFAULT_FLUSH_TIMEOUT, DEFAULT_QUEUE_CAPACITY, DEFAULT_THREAD_NAME, DEFAULT_WAIT_TIMEOUT,
    LoggerConfig,
};
pub use global::{global, shutdown_global};

use worker::{QueueItem, Shared};

/// Errors reported by the dispatch engine.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The engine no longer accepts targets.
    #[error("logger has been shut down")]
    ShutDown,
    /// `shutdown` was called a second time.
    #[error("logger was already shut down")]
    AlreadyShutDown,
    /// `shutdown` was called by a thread holding a [`BatchGuard`].
    #[error("cannot shut down while this thread holds a batch")]
    BatchActive,
    #[error("failed to spawn consumer thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("consumer thread panicked")]
    WorkerPanicked,
}

/// Dispatch engine fanning entries out to registered targets.
pub struct Logger {
    shared: Arc<Shared>,
    config: LoggerConfig,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Logger {
    /// Create an engine with the default configuration.
    pub fn new() -> Result<Self, LoggerError> {
        Self::with_config(LoggerConfig::default())
    }

    /// Create an engine and start its consumer thread.
    pub fn with_config(config: LoggerConfig) -> Result<Self, LoggerError> {
        let shared = Arc::new(Shared::new(&config));
        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker::run(worker_shared))
            .map_err(LoggerError::Spawn)?;
        Ok(Self {
            shared,
            config,
            handle: Mutex::new(Some(handle)),
        })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Hand `entry` to the engine.
    ///
    /// Returns without locking when no target is registered. Entries
    /// arriving after shutdown are discarded and counted in a rate limited
    /// warning.
    pub fn enqueue(&self, entry: LogEntry) {
        if !self.shared.has_targets.load(Ordering::Acquire) {
            return;
        }
        let notify = {
            let guard = self.shared.producer.lock();
            if self.shared.stopped.load(Ordering::Acquire) {
                drop(guard);
                self.record_dropped();
                return;
            }
            let mut state = guard.borrow_mut();
            state.pending.push_back(QueueItem::Entry(entry));
            self.shared.has_pending.store(true, Ordering::Release);
            state.batch_depth == 0
        };
        if notify {
            self.shared.notify();
        }
    }

    fn record_dropped(&self) {
        let warner = &self.shared.drop_warner;
        warner.record();
        warner.warn_if_due(|count| {
            warn!("Logger: dropped {count} entries enqueued after shutdown");
        });
    }

    /// Add a target. Entries enqueued from now on are offered to it.
    ///
    /// Registration never waits for producers; it only serialises with the
    /// consumer's delivery pass.
    pub fn register_target(&self, target: Arc<dyn LogTarget>) -> Result<(), LoggerError> {
        if self.is_shut_down() {
            return Err(LoggerError::ShutDown);
        }
        self.shared.targets.write().push(target);
        self.shared.has_targets.store(true, Ordering::Release);
        Ok(())
    }

    pub fn target_count(&self) -> usize {
        self.shared.targets.read().len()
    }

    /// Start a batch; see [`BatchGuard`].
    pub fn begin_batch(&self) -> BatchGuard<'_> {
        BatchGuard::new(self, &self.shared)
    }

    /// End a batch started with [`begin_batch`](Self::begin_batch).
    pub fn end_batch(&self, guard: BatchGuard<'_>) {
        guard.end();
    }

    pub(crate) fn notify_consumer(&self) {
        self.shared.notify();
    }

    /// Wait until everything enqueued so far has been delivered and every
    /// target has been flushed, using the configured flush timeout.
    pub fn flush(&self) -> bool {
        self.flush_timeout(self.config.flush_timeout)
    }

    /// Like [`flush`](Self::flush) with an explicit timeout.
    ///
    /// Returns `false` on timeout, when a target failed to flush, after
    /// shutdown, or when called by a thread holding a batch.
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        let (ack_tx, ack_rx) = bounded(1);
        {
            let guard = self.shared.producer.lock();
            if self.shared.stopped.load(Ordering::Acquire) {
                return false;
            }
            let mut state = guard.borrow_mut();
            if state.batch_depth > 0 {
                return false;
            }
            state.pending.push_back(QueueItem::Flush(ack_tx));
            self.shared.has_pending.store(true, Ordering::Release);
        }
        self.shared.notify();
        ack_rx.recv_timeout(timeout).unwrap_or(false)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.stopped.load(Ordering::Acquire)
    }

    /// Stop the consumer after it has delivered every pending entry.
    ///
    /// Blocks until the final drain completes. A second call returns
    /// [`LoggerError::AlreadyShutDown`]; an engine cannot be restarted.
    pub fn shutdown(&self) -> Result<(), LoggerError> {
        {
            let guard = self.shared.producer.lock();
            if self.shared.stopped.load(Ordering::Acquire) {
                return Err(LoggerError::AlreadyShutDown);
            }
            if guard.borrow().batch_depth > 0 {
                return Err(LoggerError::BatchActive);
            }
            self.shared.stopped.store(true, Ordering::Release);
        }
        self.shared.notify();
        let handle = self.handle.lock().take();
        let joined = match handle {
            Some(handle) => handle.join().map_err(|_| {
                warn!("Logger: consumer thread panicked");
                LoggerError::WorkerPanicked
            }),
            None => Ok(()),
        };
        self.shared.drop_warner.flush(|count| {
            warn!("Logger: dropped {count} entries enqueued after shutdown");
        });
        joined
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_shut_down() {
            return;
        }
        if let Err(err) = self.shutdown() {
            warn!("Logger: shutdown during drop failed: {err}");
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("targets", &self.target_count())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

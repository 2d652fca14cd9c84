//! Tuning knobs for the dispatch engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rate_limited_warner::DEFAULT_WARN_INTERVAL;

/// Default bound on a single consumer wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(50);
/// Smallest wait the consumer accepts; shorter timeouts are raised to it.
pub(crate) const MIN_WAIT_TIMEOUT: Duration = Duration::from_millis(1);
/// Default name given to the consumer thread.
pub const DEFAULT_THREAD_NAME: &str = "lg-dispatch";
/// Default capacity reserved for the pending and drain queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
/// Default time [`Logger::flush`](super::Logger::flush) waits for the consumer.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for a [`Logger`](super::Logger).
///
/// The queue capacity is only a starting reservation; queues grow as needed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub wait_timeout: Duration,
    pub thread_name: String,
    pub queue_capacity: usize,
    pub flush_timeout: Duration,
    pub warn_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl LoggerConfig {
    /// Set the bound on each consumer wait.
    ///
    /// A zero timeout is raised to one millisecond so the consumer never
    /// spins.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout.max(MIN_WAIT_TIMEOUT);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.warn_interval = interval;
        self
    }
}

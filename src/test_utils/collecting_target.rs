//! Targets that record or reject entries for test assertions.

use std::{io, sync::Arc};

use parking_lot::Mutex;

use crate::{
    level::SeverityLevel,
    log_entry::LogEntry,
    target::{LogTarget, TargetError},
};

/// Snapshot of the fields tests usually assert on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seen {
    pub level: SeverityLevel,
    pub message: String,
    pub is_bare: bool,
}

/// Target that stores every entry it receives.
#[derive(Clone)]
pub struct CollectingTarget {
    threshold: SeverityLevel,
    seen: Arc<Mutex<Vec<Seen>>>,
    flushes: Arc<Mutex<usize>>,
}

impl CollectingTarget {
    pub fn new(threshold: SeverityLevel) -> Self {
        Self {
            threshold,
            seen: Arc::default(),
            flushes: Arc::default(),
        }
    }

    pub fn collected(&self) -> Vec<Seen> {
        self.seen.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.seen.lock().iter().map(|s| s.message.clone()).collect()
    }

    pub fn flush_count(&self) -> usize {
        *self.flushes.lock()
    }
}

impl LogTarget for CollectingTarget {
    fn threshold(&self) -> SeverityLevel {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), TargetError> {
        self.seen.lock().push(Seen {
            level: entry.level(),
            message: entry.message().to_owned(),
            is_bare: entry.is_bare(),
        });
        Ok(())
    }

    fn flush(&self) -> bool {
        *self.flushes.lock() += 1;
        true
    }
}

/// Target whose writes and flushes always fail.
pub struct FailingTarget;

impl LogTarget for FailingTarget {
    fn threshold(&self) -> SeverityLevel {
        SeverityLevel::Debug
    }

    fn write(&self, _entry: &LogEntry) -> Result<(), TargetError> {
        Err(io::Error::other("sink unavailable").into())
    }

    fn flush(&self) -> bool {
        false
    }
}

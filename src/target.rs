//! Capability implemented by every log sink.

use std::io;

use thiserror::Error;

use crate::level::SeverityLevel;
use crate::log_entry::LogEntry;
use crate::network_target::WireError;

/// Errors a target may report while writing an entry.
///
/// The dispatch engine logs these through a rate limited warning and carries
/// on with the remaining targets and entries; they never reach producers.
#[derive(Debug, Error)]
pub enum TargetError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The target has no usable connection right now.
    #[error("target is disconnected")]
    Disconnected,
    /// The entry could not be encoded for transport.
    #[error(transparent)]
    Encode(#[from] WireError),
}

/// Trait implemented by all log targets.
///
/// Only the engine's single consumer thread calls [`write`](LogTarget::write),
/// so implementations never see concurrent writes; `Send + Sync` is required
/// because targets are shared with the registering application through an
/// `Arc`.
pub trait LogTarget: Send + Sync {
    /// Maximum verbosity accepted by this target.
    fn threshold(&self) -> SeverityLevel;

    /// Record one entry.
    fn write(&self, entry: &LogEntry) -> Result<(), TargetError>;

    /// Flush buffered output. Returns `false` when flushing failed.
    fn flush(&self) -> bool {
        true
    }

    /// Return `true` when `entry` clears this target's threshold.
    fn accepts(&self, entry: &LogEntry) -> bool {
        entry.level().passes(self.threshold())
    }
}

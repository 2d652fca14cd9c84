//! Embeddable asynchronous logging engine.
//!
//! Producer threads build [`LogEntry`] values and hand them to a [`Logger`].
//! A dedicated consumer thread drains the queue and fans entries out to the
//! registered [`LogTarget`]s whose threshold they clear: console and file
//! targets render text through an [`EntryFormatter`], the [`NetworkTarget`]
//! ships binary frames to a remote collector. [`FastLogEntry`] packs
//! primitive arguments into a fixed inline buffer for allocation-free call
//! sites.

pub mod color;
pub mod fast_entry;
pub mod file_target;
pub mod formatter;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_entry;
pub mod logger;
mod logging_macros;
pub mod network_target;
pub mod rate_limited_warner;
pub mod stream_target;
pub mod target;

#[cfg(test)]
mod test_utils;

pub use color::ConsoleColor;
pub use fast_entry::{EntryType, FastArg, FastEntryError, FastLogEntry};
pub use file_target::{FileTarget, OpenMode};
pub use formatter::{ClangFormatter, DefaultFormatter, EntryFormatter};
pub use level::{InvalidSeverity, ParseSeverityError, SeverityLevel};
#[cfg(feature = "log-compat")]
pub use log_compat::LogBridge;
pub use log_entry::LogEntry;
pub use logger::{BatchGuard, Logger, LoggerConfig, LoggerError};
pub use network_target::{
    BackoffPolicy, Endpoint, NetworkTarget, NetworkTargetConfig, NetworkTargetError, WireError,
    WireFrame,
};
pub use stream_target::StreamTarget;
pub use target::{LogTarget, TargetError};

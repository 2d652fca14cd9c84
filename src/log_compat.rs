//! Compatibility bridge for the Rust `log` crate.
//!
//! [`LogBridge`] implements `log::Log` and turns each record into a
//! [`LogEntry`] enqueued on a shared [`Logger`]. Records emitted by this
//! crate itself are skipped so engine diagnostics cannot feed back into the
//! engine.

use std::sync::Arc;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::{level::SeverityLevel, log_entry::LogEntry, logger::Logger};

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

impl From<log::Level> for SeverityLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => SeverityLevel::Error,
            log::Level::Warn => SeverityLevel::Warning,
            log::Level::Info => SeverityLevel::Info,
            log::Level::Debug | log::Level::Trace => SeverityLevel::Debug,
        }
    }
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// `log::Log` implementation forwarding records to a [`Logger`].
pub struct LogBridge {
    logger: Arc<Logger>,
    max_level: LevelFilter,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>, max_level: LevelFilter) -> Self {
        Self { logger, max_level }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level && !is_own_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = SeverityLevel::from(record.level());
        let entry = LogEntry::new(
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
        )
        .with_level(level)
        .with_color(level.default_color())
        .with_tag(record.target())
        .append(record.args());
        self.logger.enqueue(entry);
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

/// Install a [`LogBridge`] over `logger` as the global `log` backend.
///
/// Fails when another global logger is already set.
pub fn install(logger: Arc<Logger>, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    let bridge: &'static LogBridge = Box::leak(Box::new(LogBridge::new(logger, max_level)));
    log::set_logger(bridge)?;
    log::set_max_level(max_level);
    Ok(())
}

//! Process-wide engine for applications that prefer a global over passing a
//! [`Logger`] around.
//!
//! The engine is created on first use and lives until process exit. Call
//! [`shutdown_global`] exactly once, as the application exits, to drain it.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{level::SeverityLevel, stream_target::StreamTarget};

use super::{Logger, LoggerError};

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Return the process-wide engine, creating it on first call.
pub fn global() -> Result<&'static Logger, LoggerError> {
    GLOBAL.get_or_try_init(Logger::new)
}

/// Shut the process-wide engine down.
///
/// Does nothing when the engine was never created. A second call returns
/// [`LoggerError::AlreadyShutDown`].
pub fn shutdown_global() -> Result<(), LoggerError> {
    match GLOBAL.get() {
        Some(logger) => logger.shutdown(),
        None => Ok(()),
    }
}

impl Logger {
    /// Register a stdout console target with `threshold` on the global
    /// engine and return it.
    pub fn default_init(threshold: SeverityLevel) -> Result<&'static Logger, LoggerError> {
        let logger = global()?;
        logger.register_target(Arc::new(StreamTarget::stdout(threshold)))?;
        Ok(logger)
    }
}

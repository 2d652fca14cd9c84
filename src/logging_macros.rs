//! Call-site macros that build and enqueue entries.
//!
//! Each macro captures `file!()` and `line!()` at the call site, applies the
//! level and its default colour, formats the message with `format_args!`
//! and hands the entry to the given [`Logger`](crate::Logger).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use lg_engine::{Logger, SeverityLevel, StreamTarget, lg_bare, lg_info};
//!
//! let logger = Logger::new().expect("spawn consumer");
//! logger
//!     .register_target(Arc::new(StreamTarget::stdout(SeverityLevel::Info)))
//!     .expect("register");
//! lg_info!(logger, "listening on port {}", 8080);
//! lg_bare!(logger, "continuation line");
//! logger.shutdown().expect("shutdown");
//! ```

/// Log at `fatal` level.
#[macro_export]
macro_rules! lg_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__lg_log!($logger, $crate::SeverityLevel::Fatal, $($arg)+)
    };
}

/// Log at `error` level.
#[macro_export]
macro_rules! lg_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__lg_log!($logger, $crate::SeverityLevel::Error, $($arg)+)
    };
}

/// Log at `warning` level.
#[macro_export]
macro_rules! lg_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__lg_log!($logger, $crate::SeverityLevel::Warning, $($arg)+)
    };
}

/// Log at `info` level.
#[macro_export]
macro_rules! lg_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__lg_log!($logger, $crate::SeverityLevel::Info, $($arg)+)
    };
}

/// Log at `debug` level.
#[macro_export]
macro_rules! lg_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__lg_log!($logger, $crate::SeverityLevel::Debug, $($arg)+)
    };
}

/// Enqueue a bare continuation entry, rendered without a level header.
#[macro_export]
macro_rules! lg_bare {
    ($logger:expr, $($arg:tt)+) => {
        $logger.enqueue(
            $crate::LogEntry::bare(::std::file!(), ::std::line!())
                .append(::std::format_args!($($arg)+)),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __lg_log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level: $crate::SeverityLevel = $level;
        $logger.enqueue(
            $crate::LogEntry::new(::std::file!(), ::std::line!())
                .with_level(level)
                .with_color(level.default_color())
                .append(::std::format_args!($($arg)+)),
        )
    }};
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        Logger, SeverityLevel,
        test_utils::collecting_target::{CollectingTarget, Seen},
    };

    #[test]
    fn macros_enqueue_with_level_and_location() {
        let logger = Logger::new().expect("spawn consumer");
        let target = CollectingTarget::new(SeverityLevel::Debug);
        logger
            .register_target(Arc::new(target.clone()))
            .expect("register target");

        lg_fatal!(logger, "fatal {}", 1);
        lg_error!(logger, "error");
        lg_warning!(logger, "warning {x}", x = 3);
        lg_info!(logger, "info");
        lg_debug!(logger, "debug");
        lg_bare!(logger, "  at frame {}", 0);
        logger.shutdown().expect("shutdown");

        let seen = target.collected();
        let levels: Vec<_> = seen.iter().map(|s| s.level).collect();
        assert_eq!(
            levels[..5],
            [
                SeverityLevel::Fatal,
                SeverityLevel::Error,
                SeverityLevel::Warning,
                SeverityLevel::Info,
                SeverityLevel::Debug,
            ]
        );
        assert_eq!(seen[0].message, "fatal 1");
        assert_eq!(seen[2].message, "warning 3");
        assert_eq!(
            seen[5],
            Seen {
                level: SeverityLevel::Info,
                message: "  at frame 0".into(),
                is_bare: true,
            }
        );
    }
}

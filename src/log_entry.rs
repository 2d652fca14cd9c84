//! Log entry representation.
//!
//! A [`LogEntry`] is assembled at the call site through a chain of consuming
//! builder steps and then handed over to the [`Logger`](crate::Logger). The
//! type is intentionally neither `Clone` nor `Copy`: a half-built entry can
//! only be moved along the chain, never duplicated.

use std::error::Error;
use std::fmt::{self, Write as _};

use chrono::{DateTime, Local, Utc};

use crate::color::ConsoleColor;
use crate::level::SeverityLevel;

#[derive(Debug)]
pub struct LogEntry {
    file: String,
    line: u32,
    is_bare: bool,
    timestamp: i64,
    formatted_time: String,
    level: SeverityLevel,
    color: ConsoleColor,
    tag: String,
    message: String,
}

/// Render epoch seconds as local `HH:MM:SS`.
fn format_time(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| String::from("--:--:--"))
}

impl LogEntry {
    /// Start a regular entry for the given source location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self::with_time(file, line, false, Utc::now().timestamp())
    }

    /// Start a bare continuation entry, rendered without a level header.
    pub fn bare(file: impl Into<String>, line: u32) -> Self {
        Self::with_time(file, line, true, Utc::now().timestamp())
    }

    /// Start an entry with an explicit capture time in epoch seconds.
    pub fn with_time(file: impl Into<String>, line: u32, is_bare: bool, timestamp: i64) -> Self {
        Self {
            file: file.into(),
            line,
            is_bare,
            timestamp,
            formatted_time: format_time(timestamp),
            level: SeverityLevel::default(),
            color: ConsoleColor::default(),
            tag: String::new(),
            message: String::new(),
        }
    }

    pub fn with_level(mut self, level: SeverityLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_color(mut self, color: ConsoleColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Append the display form of `value` to the message.
    pub fn append(mut self, value: impl fmt::Display) -> Self {
        // Writing into a String cannot fail.
        let _ = write!(self.message, "{value}");
        self
    }

    /// Append the display form of an error to the message.
    pub fn append_error(self, err: &(dyn Error + '_)) -> Self {
        self.append(err)
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_bare(&self) -> bool {
        self.is_bare
    }

    /// Capture time in epoch seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Capture time rendered as local `HH:MM:SS`.
    pub fn formatted_time(&self) -> &str {
        &self.formatted_time
    }

    pub fn level(&self) -> SeverityLevel {
        self.level
    }

    pub fn color(&self) -> ConsoleColor {
        self.color
    }

    /// Tag label, empty when the entry is untagged.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}

//! Text formatters used by the stream and file targets.
//!
//! Formatters render a [`LogEntry`] into a single line of text without a
//! trailing newline; the target appends the line terminator.

use std::sync::Arc;

use crate::color::ANSI_RESET;
use crate::log_entry::LogEntry;

/// Trait for formatting log entries into strings.
///
/// Implementors must be thread-safe (`Send + Sync`) so formatters can be
/// shared between targets.
pub trait EntryFormatter: Send + Sync {
    /// Format a log entry into a string representation.
    fn format(&self, entry: &LogEntry) -> String;
}

/// `[HH:MM:SS]   Level| message` layout.
#[derive(Copy, Clone, Debug)]
pub struct DefaultFormatter {
    use_color: bool,
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self { use_color: true }
    }
}

impl DefaultFormatter {
    /// Formatter that never emits ANSI escapes.
    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl EntryFormatter for DefaultFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        if entry.is_bare() {
            return format!("{:>20}{}", "| ", entry.message());
        }
        let (start, end) = color_span(self.use_color, entry);
        format!(
            "[{:>8}] {start}{:>7}{end}| {}",
            entry.formatted_time(),
            entry.level().name(),
            entry.message()
        )
    }
}

/// Compiler diagnostic style: `tag: level: message`.
#[derive(Copy, Clone, Debug)]
pub struct ClangFormatter {
    use_color: bool,
}

impl Default for ClangFormatter {
    fn default() -> Self {
        Self { use_color: true }
    }
}

impl ClangFormatter {
    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl EntryFormatter for ClangFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        if entry.is_bare() {
            return format!("{:12}{}", "", entry.message());
        }
        let mut output = String::new();
        if !entry.tag().is_empty() {
            output.push_str(entry.tag());
            output.push_str(": ");
        }
        let (start, end) = color_span(self.use_color, entry);
        output.push_str(start);
        output.push_str(&entry.level().name().to_ascii_lowercase());
        output.push_str(end);
        output.push_str(": ");
        output.push_str(entry.message());
        output
    }
}

fn color_span(use_color: bool, entry: &LogEntry) -> (&'static str, &'static str) {
    if use_color {
        (entry.color().ansi_foreground(), ANSI_RESET)
    } else {
        ("", "")
    }
}

impl EntryFormatter for Arc<dyn EntryFormatter> {
    fn format(&self, entry: &LogEntry) -> String {
        (**self).format(entry)
    }
}

impl EntryFormatter for Box<dyn EntryFormatter> {
    fn format(&self, entry: &LogEntry) -> String {
        (**self).format(entry)
    }
}

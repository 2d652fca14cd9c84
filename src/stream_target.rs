//! Stream-based log target.
//!
//! `StreamTarget` formats entries and writes them to any `io::Write`. The
//! dispatch engine's consumer thread is the only caller, so the writer is
//! written to synchronously; producers never touch it.

use std::io::{self, Write};

use parking_lot::Mutex;

use crate::{
    formatter::{DefaultFormatter, EntryFormatter},
    level::SeverityLevel,
    log_entry::LogEntry,
    target::{LogTarget, TargetError},
};

/// Target that writes formatted entries to an `io::Write` stream.
pub struct StreamTarget<W, F = DefaultFormatter> {
    threshold: SeverityLevel,
    formatter: F,
    writer: Mutex<W>,
}

impl StreamTarget<io::Stdout> {
    /// Console target writing to `stdout` with a [`DefaultFormatter`].
    pub fn stdout(threshold: SeverityLevel) -> Self {
        Self::new(threshold, io::stdout(), DefaultFormatter::default())
    }
}

impl StreamTarget<io::Stderr> {
    /// Console target writing to `stderr` with a [`DefaultFormatter`].
    pub fn stderr(threshold: SeverityLevel) -> Self {
        Self::new(threshold, io::stderr(), DefaultFormatter::default())
    }
}

impl<W, F> StreamTarget<W, F>
where
    W: Write + Send,
    F: EntryFormatter,
{
    /// Create a target from an arbitrary writer and formatter.
    pub fn new(threshold: SeverityLevel, writer: W, formatter: F) -> Self {
        Self {
            threshold,
            formatter,
            writer: Mutex::new(writer),
        }
    }

    /// Consume the target and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W, F> LogTarget for StreamTarget<W, F>
where
    W: Write + Send,
    F: EntryFormatter,
{
    fn threshold(&self) -> SeverityLevel {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), TargetError> {
        let line = self.formatter.format(entry);
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> bool {
        self.writer.lock().flush().is_ok()
    }
}

impl<W, F> std::fmt::Debug for StreamTarget<W, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTarget")
            .field("threshold", &self.threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::ClangFormatter;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn writes_one_line_per_entry() {
        let target = StreamTarget::new(SeverityLevel::Debug, Vec::new(), ClangFormatter::plain());
        target
            .write(&LogEntry::new("a.rs", 1).with_level(SeverityLevel::Error).append("first"))
            .expect("write first");
        target
            .write(&LogEntry::new("a.rs", 2).append("second"))
            .expect("write second");
        let output = String::from_utf8(target.into_inner()).expect("utf8 output");
        assert_eq!(output, "error: first\ninfo: second\n");
    }

    #[test]
    fn io_errors_are_reported() {
        let target = StreamTarget::new(SeverityLevel::Debug, FailingWriter, ClangFormatter::plain());
        let err = target
            .write(&LogEntry::new("a.rs", 1))
            .expect_err("writer fails");
        assert!(matches!(err, TargetError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert!(!target.flush());
    }
}

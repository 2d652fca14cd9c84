//! File-based log target.
//!
//! `FileTarget` opens a file either in append mode (the default) or
//! truncating it, and writes one formatted line per entry through a buffered
//! writer. Each entry is flushed so a crash loses at most the entry being
//! written.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter},
    path::Path,
};

use crate::{
    formatter::{DefaultFormatter, EntryFormatter},
    level::SeverityLevel,
    log_entry::LogEntry,
    stream_target::StreamTarget,
    target::{LogTarget, TargetError},
};

/// How an existing file is treated when the target opens it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenMode {
    #[default]
    Append,
    Truncate,
}

fn open_log_file(path: &Path, mode: OpenMode) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        OpenMode::Append => options.append(true),
        OpenMode::Truncate => options.write(true).truncate(true),
    };
    options.open(path)
}

/// Target appending formatted entries to a file.
pub struct FileTarget<F = DefaultFormatter> {
    inner: StreamTarget<BufWriter<File>, F>,
}

impl FileTarget {
    /// Open `path` in append mode using a plain [`DefaultFormatter`].
    pub fn new<P: AsRef<Path>>(threshold: SeverityLevel, path: P) -> io::Result<Self> {
        Self::with_formatter(threshold, path, OpenMode::Append, DefaultFormatter::plain())
    }
}

impl<F: EntryFormatter> FileTarget<F> {
    /// Open `path` with an explicit mode and formatter.
    pub fn with_formatter<P: AsRef<Path>>(
        threshold: SeverityLevel,
        path: P,
        mode: OpenMode,
        formatter: F,
    ) -> io::Result<Self> {
        let path = path.as_ref();
        let file = open_log_file(path, mode)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
        Ok(Self {
            inner: StreamTarget::new(threshold, BufWriter::new(file), formatter),
        })
    }
}

impl<F: EntryFormatter> LogTarget for FileTarget<F> {
    fn threshold(&self) -> SeverityLevel {
        self.inner.threshold()
    }

    fn write(&self, entry: &LogEntry) -> Result<(), TargetError> {
        self.inner.write(entry)
    }

    fn flush(&self) -> bool {
        self.inner.flush()
    }
}

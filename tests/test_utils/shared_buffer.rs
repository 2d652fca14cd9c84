//! Shared buffer used to capture rendered output in integration tests.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

/// Thread-safe wrapper around a byte buffer used by stream targets.
///
/// The inner `Arc<Mutex<Vec<u8>>>` is kept private so tests can't
/// accidentally bypass the `Write` implementation.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Return the buffer contents decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.buffer.lock().expect("SharedBuf mutex poisoned").clone();
        String::from_utf8(bytes).expect("valid UTF-8 output")
    }

    /// Return the captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("SharedBuf mutex poisoned")
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! Logging sandbox: redirects `tracing` output to an in-memory buffer.
//!
//! Uses [`tracing::subscriber::set_default`], which scopes the subscriber to
//! the current thread and hands back a guard that restores the previous
//! dispatcher on drop. Sandboxed tests are synchronous and single-threaded,
//! so thread-scoped capture sees everything the test emits.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing::Level;

/// Shared byte buffer handed to the subscriber as its writer.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(pub(crate) Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap_or_else(|e| e.into_inner())).into_owned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captures everything emitted through `tracing` while it is alive.
pub struct LogCapture {
    buf: SharedBuf,
    _guard: DefaultGuard,
}

impl LogCapture {
    /// Capture at INFO and above.
    pub fn new() -> Self {
        Self::at_level(Level::INFO)
    }

    /// Capture at `level` and above.
    pub fn at_level(level: Level) -> Self {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(level)
            .with_ansi(false)
            .without_time()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { buf, _guard: guard }
    }

    /// Everything captured so far, lossily decoded.
    pub fn logged(&self) -> String {
        self.buf.contents()
    }

    /// Discard captured output, e.g. after asserting on setup noise.
    pub fn clear(&self) {
        self.buf.0.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

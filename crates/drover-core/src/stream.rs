//! Output stream seam.
//!
//! The client writes human-facing output through [`OutputStreams`] rather
//! than `println!`/`eprintln!`, so tests can hand it capturing sinks and
//! assert on (or forbid) what was written.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A cloneable, shared write handle. Clones write to the same underlying
/// writer; the mutex keeps interleaved writes whole.
#[derive(Clone)]
pub struct Sink(Arc<Mutex<dyn Write + Send>>);

impl Sink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Sink(Arc::new(Mutex::new(writer)))
    }

    /// Write a complete line, appending a newline if missing.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut w = self.0.lock().unwrap_or_else(|e| e.into_inner());
        w.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            w.write_all(b"\n")?;
        }
        w.flush()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sink(..)")
    }
}

/// The pair of streams a client run writes to.
#[derive(Debug, Clone)]
pub struct OutputStreams {
    pub out: Sink,
    pub err: Sink,
}

impl OutputStreams {
    pub fn new(out: Sink, err: Sink) -> Self {
        Self { out, err }
    }

    /// Streams wired to the real process stdout/stderr.
    pub fn stdio() -> Self {
        Self {
            out: Sink::new(io::stdout()),
            err: Sink::new(io::stderr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn write_line_appends_newline_once() {
        let buf: Arc<Mutex<Vec<u8>>> = Arc::default();
        let sink = Sink(buf.clone());
        sink.write_line("hello").unwrap();
        sink.write_line("world\n").unwrap();
        let got = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert_eq!(got, "hello\nworld\n");
    }
}

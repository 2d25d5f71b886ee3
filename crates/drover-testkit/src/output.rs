//! Output guards: catch stray stdout writes and capture error-exit stderr.

use drover_core::{Error, OutputStreams, Sink};

use crate::logging::SharedBuf;

/// Fails the test if the code under test wrote anything to its standard
/// output channel.
///
/// Hand [`StdoutGuard::sink`] to the code under test as its stdout, run the
/// test body, then call [`StdoutGuard::finish`]. Dropping the guard without
/// finishing performs the same check, unless the test is already panicking.
#[must_use = "call finish() after the code under test has run"]
pub struct StdoutGuard {
    buf: SharedBuf,
    finished: bool,
}

impl StdoutGuard {
    pub fn new() -> Self {
        Self {
            buf: SharedBuf::default(),
            finished: false,
        }
    }

    /// The capturing stdout sink to hand to the code under test.
    pub fn sink(&self) -> Sink {
        Sink::new(self.buf.clone())
    }

    /// Panics iff anything was captured.
    pub fn finish(mut self) {
        self.finished = true;
        self.check();
    }

    fn check(&self) {
        if !self.buf.is_empty() {
            panic!("value written to stdout: {}", self.buf.contents());
        }
    }
}

impl Default for StdoutGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StdoutGuard {
    fn drop(&mut self) {
        if !self.finished && !std::thread::panicking() {
            self.check();
        }
    }
}

/// Captured text from a [`capture_streams`] pair.
pub struct CapturedOutput {
    out: SharedBuf,
    err: SharedBuf,
}

impl CapturedOutput {
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}

/// Build an [`OutputStreams`] pair whose writes land in memory, plus the
/// handle for reading them back.
pub fn capture_streams() -> (OutputStreams, CapturedOutput) {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let streams = OutputStreams::new(Sink::new(out.clone()), Sink::new(err.clone()));
    (streams, CapturedOutput { out, err })
}

/// Run code that is expected to exit with an error status, capturing what it
/// wrote to standard error.
///
/// The closure receives capturing [`OutputStreams`] and must return
/// [`Error::Exit`]; the captured stderr text is returned for assertions.
/// Returning `Ok` or any other error fails the test.
///
/// ```rust,no_run
/// # use drover_testkit::expect_exit;
/// let stderr = expect_exit(|streams| drover_core::Client::system().run(&[], streams).map(|_| ()));
/// assert!(stderr.contains("usage"));
/// ```
pub fn expect_exit<T>(body: impl FnOnce(&OutputStreams) -> Result<T, Error>) -> String {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let streams = OutputStreams::new(Sink::new(out.clone()), Sink::new(err.clone()));
    match body(&streams) {
        Err(Error::Exit { .. }) => err.contents(),
        Ok(_) => panic!("code under test did not exit"),
        Err(other) => panic!("expected an exit error, got: {other}"),
    }
}

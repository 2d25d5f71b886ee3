//! Execution backend: runs external commands on behalf of a [`Client`],
//! enforcing the soft deadline.
//!
//! [`Client`]: crate::client::Client

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::process::{Spawner, SystemSpawner};
use crate::stream::OutputStreams;
use crate::tempfiles::{SystemTempFiles, TempFiles, TempHandle};

/// The component that actually invokes external commands and tracks timing.
///
/// Holds the three injected capabilities (spawner, clock, temp files) plus
/// the soft deadline. All fields except the deadline are fixed at
/// construction; the deadline is mutable so a runner can arm it per job.
pub struct ExecBackend {
    spawner: Arc<dyn Spawner>,
    clock: Arc<dyn Clock>,
    temp_files: Arc<dyn TempFiles>,
    soft_deadline: Option<DateTime<Utc>>,
}

impl ExecBackend {
    pub fn new(
        spawner: Arc<dyn Spawner>,
        clock: Arc<dyn Clock>,
        temp_files: Arc<dyn TempFiles>,
    ) -> Self {
        Self {
            spawner,
            clock,
            temp_files,
            soft_deadline: None,
        }
    }

    /// Backend wired to the real system capabilities.
    pub fn system() -> Self {
        Self::new(
            Arc::new(SystemSpawner),
            Arc::new(SystemClock),
            Arc::new(SystemTempFiles),
        )
    }

    pub fn soft_deadline(&self) -> Option<DateTime<Utc>> {
        self.soft_deadline
    }

    pub fn set_soft_deadline(&mut self, deadline: Option<DateTime<Utc>>) {
        self.soft_deadline = deadline;
    }

    /// Swap the time source. Used by tests to simulate deadline conditions.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    /// Swap the temp-file factory. Used by tests to observe staged payloads.
    pub fn set_temp_files(&mut self, temp_files: Arc<dyn TempFiles>) {
        self.temp_files = temp_files;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Error if the soft deadline is armed and already behind us.
    pub fn check_deadline(&self) -> Result<(), Error> {
        let Some(deadline) = self.soft_deadline else {
            return Ok(());
        };
        let now = self.clock.now();
        if now > deadline {
            return Err(Error::DeadlineExceeded { deadline, now });
        }
        Ok(())
    }

    /// Stage a payload file through the temp-file capability.
    pub fn stage_payload(&self, contents: &[u8]) -> Result<TempHandle, Error> {
        let handle = self.temp_files.create()?;
        handle.write(contents)?;
        Ok(handle)
    }

    /// Run `argv`, forwarding its stdout/stderr to `streams`. Fails up front
    /// when past the soft deadline, and maps a non-zero exit status to
    /// [`Error::CommandFailed`].
    pub fn run(&self, argv: &[String], streams: &OutputStreams) -> Result<String, Error> {
        self.check_deadline()?;
        let mut proc = self.spawner.spawn(argv)?;
        let (out, err) = proc.communicate()?;
        if !out.is_empty() {
            streams.out.write_line(&out)?;
        }
        if !err.is_empty() {
            streams.err.write_line(&err)?;
        }
        match proc.returncode() {
            Some(0) | None => Ok(out),
            Some(code) => Err(Error::CommandFailed {
                argv: argv.to_vec(),
                code,
                stderr: err,
            }),
        }
    }
}

impl std::fmt::Debug for ExecBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecBackend")
            .field("soft_deadline", &self.soft_deadline)
            .finish_non_exhaustive()
    }
}

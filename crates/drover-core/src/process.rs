//! Process spawning seam.
//!
//! [`Spawner`] is the only place drover launches external commands. The
//! backend holds an `Arc<dyn Spawner>`, so the test suite can substitute a
//! recorder, a canned double, or a spawner that forbids spawning outright.

use std::io::Read;
use std::process::{Command, Stdio};

use crate::error::Error;

/// Handle to a launched (or simulated) external process.
pub trait ProcessHandle {
    /// Wait for the process to finish and return its captured
    /// (stdout, stderr). Records the exit code, retrievable afterwards via
    /// [`ProcessHandle::returncode`].
    fn communicate(&mut self) -> Result<(String, String), Error>;

    /// Non-blocking exit-code query. `None` means still running.
    fn poll(&mut self) -> Option<i32>;

    /// Exit code recorded by a completed `communicate` or `poll`.
    fn returncode(&self) -> Option<i32>;
}

/// Launches external processes.
pub trait Spawner: Send + Sync {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn ProcessHandle>, Error>;
}

/// The real spawner, backed by [`std::process::Command`] with piped
/// stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn ProcessHandle>, Error> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty argv",
            ))
        })?;
        tracing::debug!(command = %argv.join(" "), "spawning");
        let child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        Ok(Box::new(SystemProcess {
            child: Some(child),
            code: None,
        }))
    }
}

struct SystemProcess {
    /// Taken by `communicate`; `None` afterwards.
    child: Option<std::process::Child>,
    code: Option<i32>,
}

impl ProcessHandle for SystemProcess {
    fn communicate(&mut self) -> Result<(String, String), Error> {
        let mut child = self.child.take().ok_or_else(|| {
            Error::Io(std::io::Error::other("communicate called twice"))
        })?;
        let mut out = String::new();
        let mut err = String::new();
        if let Some(stdout) = child.stdout.take() {
            read_lossy(stdout, &mut out)?;
        }
        if let Some(stderr) = child.stderr.take() {
            read_lossy(stderr, &mut err)?;
        }
        let status = child.wait()?;
        self.code = status.code();
        Ok((out, err))
    }

    fn poll(&mut self) -> Option<i32> {
        if self.code.is_some() {
            return self.code;
        }
        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(Some(status)) => {
                self.code = status.code();
                self.code
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "try_wait failed");
                None
            }
        }
    }

    fn returncode(&self) -> Option<i32> {
        self.code
    }
}

fn read_lossy(mut reader: impl Read, into: &mut String) -> std::io::Result<()> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    into.push_str(&String::from_utf8_lossy(&bytes));
    Ok(())
}

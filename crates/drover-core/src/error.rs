//! Error taxonomy for drover-core.

use chrono::{DateTime, Utc};

/// Errors surfaced by the client and its execution backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend's soft deadline has passed; no further commands may run.
    #[error("command timed out: soft deadline {deadline} passed (now {now})")]
    DeadlineExceeded {
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The process should terminate with the given status. Produced by the
    /// CLI layer for usage errors (after writing the message to the error
    /// stream), never by the backend itself.
    #[error("exit with status {code}")]
    Exit { code: i32 },

    /// An external command ran and reported a non-zero status.
    #[error("command {argv:?} failed with status {code}: {stderr}")]
    CommandFailed {
        argv: Vec<String>,
        code: i32,
        stderr: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Exit status the `drover` binary should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Exit { code } => *code,
            Error::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

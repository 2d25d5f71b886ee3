//! The drover client: configuration plus an execution backend.

use chrono::{DateTime, Duration, Utc};

use crate::backend::ExecBackend;
use crate::config::Config;
use crate::error::Error;
use crate::stream::OutputStreams;

/// A connection to the tool's execution machinery. Owns the config and the
/// backend; the binary builds one per invocation, tests build them with
/// substituted capabilities.
#[derive(Debug)]
pub struct Client {
    config: Config,
    backend: ExecBackend,
}

impl Client {
    pub fn new(config: Config, backend: ExecBackend) -> Self {
        Self { config, backend }
    }

    /// Client with built-in default config and the real system backend.
    pub fn system() -> Self {
        Self::new(Config::defaults(), ExecBackend::system())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn backend(&self) -> &ExecBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut ExecBackend {
        &mut self.backend
    }

    /// Arm the backend's soft deadline from the configured budget, counting
    /// from the backend's current time. Budgets too large to represent
    /// saturate at the far end of the calendar.
    pub fn arm_deadline(&mut self) {
        if let Some(secs) = self.config.run.soft_deadline_secs {
            let budget = i64::try_from(secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX);
            let deadline = self
                .backend
                .now()
                .checked_add_signed(budget)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.backend.set_soft_deadline(Some(deadline));
        }
    }

    /// Run one external command through the backend.
    pub fn run(&self, argv: &[String], streams: &OutputStreams) -> Result<String, Error> {
        tracing::info!(command = %argv.join(" "), "running command");
        self.backend.run(argv, streams)
    }
}

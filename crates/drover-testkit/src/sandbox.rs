//! Isolated test case scaffolding.
//!
//! [`TestSandbox`] gives a test exclusive ownership of the process-wide
//! globals it touches: the environment is snapshotted and replaced with a
//! private base mapping, the tracing output is redirected to an in-memory
//! buffer, and any client built through the sandbox refuses to spawn real
//! processes. A global lock serializes sandboxed tests so the parallel test
//! runner cannot interleave environment mutations.
//!
//! Restoration is driven entirely by `Drop`, so it happens in reverse
//! acquisition order whether the test passes or panics.

use std::ffi::OsString;
use std::sync::{Arc, Mutex, MutexGuard};

use drover_core::{Client, Config, ExecBackend, Spawner, SystemClock, SystemTempFiles};
use tracing::Level;

use crate::fake_process::ForbiddenSpawner;
use crate::logging::LogCapture;

/// Serializes every test that replaces the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Builder for [`TestSandbox`]: the base environment mapping and the capture
/// level for the logging sandbox.
pub struct SandboxBuilder {
    base_env: Vec<(String, String)>,
    log_level: Level,
}

impl SandboxBuilder {
    fn new() -> Self {
        Self {
            base_env: Vec::new(),
            log_level: Level::INFO,
        }
    }

    /// Seed a variable into the sandbox's private environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_env.push((key.into(), value.into()));
        self
    }

    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn build(self) -> TestSandbox {
        let env_lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let saved_env: Vec<(OsString, OsString)> = std::env::vars_os().collect();
        for (key, _) in &saved_env {
            std::env::remove_var(key);
        }
        for (key, value) in &self.base_env {
            std::env::set_var(key, value);
        }

        let log = LogCapture::at_level(self.log_level);

        TestSandbox {
            log,
            cleanups: Vec::new(),
            saved_env,
            _env_lock: env_lock,
        }
    }
}

/// The unit of isolation. See the module docs for what it owns.
pub struct TestSandbox {
    log: LogCapture,
    cleanups: Vec<Box<dyn FnOnce() + Send>>,
    saved_env: Vec<(OsString, OsString)>,
    // Held for the sandbox's whole lifetime; released after restoration.
    _env_lock: MutexGuard<'static, ()>,
}

impl TestSandbox {
    /// Sandbox with an empty base environment and INFO-level log capture.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> SandboxBuilder {
        SandboxBuilder::new()
    }

    /// Set a variable in the sandboxed environment. No per-variable undo is
    /// needed; teardown restores the full pre-sandbox environment.
    pub fn set_env(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    /// Register an action to run at teardown. Actions run in reverse
    /// registration order, before the environment is restored.
    pub fn defer(&mut self, action: impl FnOnce() + Send + 'static) {
        self.cleanups.push(Box::new(action));
    }

    /// Everything captured from `tracing` so far.
    pub fn logged(&self) -> String {
        self.log.logged()
    }

    /// A client whose backend fails the test if anything tries to spawn a
    /// real process.
    pub fn client(&self) -> Client {
        self.client_with(Arc::new(ForbiddenSpawner))
    }

    /// A client wired to the given spawner (typically a
    /// [`RecordingSpawner`](crate::fake_process::RecordingSpawner)), with the
    /// system clock and temp-file factory.
    pub fn client_with(&self, spawner: Arc<dyn Spawner>) -> Client {
        let backend = ExecBackend::new(spawner, Arc::new(SystemClock), Arc::new(SystemTempFiles));
        Client::new(Config::defaults(), backend)
    }
}

impl Default for TestSandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestSandbox {
    fn drop(&mut self) {
        for action in self.cleanups.drain(..).rev() {
            action();
        }
        let current: Vec<OsString> = std::env::vars_os().map(|(key, _)| key).collect();
        for key in current {
            std::env::remove_var(key);
        }
        for (key, value) in self.saved_env.drain(..) {
            std::env::set_var(key, value);
        }
        // Field drops then restore the tracing dispatcher and release the
        // env lock, in that order.
    }
}

//! Fake home directory fixture.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sandbox::TestSandbox;

/// An isolated home directory for drover to use.
///
/// Creates a temp directory, points `HOME` at it, points `PATH` at its
/// `.local/bin` subdirectory, and creates the hidden `.drover` config
/// directory inside it. The directory tree is deleted when the fixture
/// drops; the environment variables are undone by the sandbox's own
/// teardown.
pub struct FakeHome {
    dir: tempfile::TempDir,
}

impl FakeHome {
    /// Requires a live [`TestSandbox`] so the `HOME`/`PATH` mutations are
    /// covered by its environment snapshot.
    pub fn new(sandbox: &TestSandbox) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let home = dir.path();
        sandbox.set_env("HOME", &home.display().to_string());
        sandbox.set_env(
            "PATH",
            &home.join(".local").join("bin").display().to_string(),
        );
        fs::create_dir(home.join(".drover"))?;
        Ok(Self { dir })
    }

    /// The fake `$HOME`.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The hidden config directory, `$HOME/.drover`.
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join(".drover")
    }

    /// Write a config file into the fixture's `.drover` directory.
    pub fn write_config(&self, contents: &str) -> io::Result<PathBuf> {
        let path = self.config_dir().join("config.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }
}

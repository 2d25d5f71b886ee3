//! Temp-file creation seam.
//!
//! The backend stages command payloads through a [`TempFiles`] capability
//! instead of calling [`tempfile::NamedTempFile`] directly, so a test can
//! hand it a factory that returns an observable file the test controls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A named file on disk. If owned, the file is removed when the handle
/// drops; a borrowed handle leaves removal to whoever created the path.
#[derive(Debug)]
pub struct TempHandle {
    path: PathBuf,
    owned: bool,
}

impl TempHandle {
    /// Handle that deletes `path` on drop.
    pub fn owned(path: PathBuf) -> Self {
        Self { path, owned: true }
    }

    /// Handle whose drop leaves the file in place.
    pub fn borrowed(path: PathBuf) -> Self {
        Self { path, owned: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file's contents.
    pub fn write(&self, contents: &[u8]) -> io::Result<()> {
        fs::write(&self.path, contents)
    }
}

impl Drop for TempHandle {
    fn drop(&mut self) {
        if self.owned {
            // Already-gone is fine: the consumer may have unlinked it.
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Creates named temporary files.
pub trait TempFiles: Send + Sync {
    fn create(&self) -> io::Result<TempHandle>;
}

/// The real factory, backed by [`tempfile::NamedTempFile`]. The tempfile
/// crate's own delete-on-drop is disabled; the returned [`TempHandle`] owns
/// cleanup instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempFiles;

impl TempFiles for SystemTempFiles {
    fn create(&self) -> io::Result<TempHandle> {
        let file = tempfile::NamedTempFile::new()?;
        let (_file, path) = file.keep().map_err(|e| e.error)?;
        Ok(TempHandle::owned(path))
    }
}

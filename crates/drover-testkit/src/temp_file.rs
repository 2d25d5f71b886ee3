//! Observable temporary file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use drover_core::{TempFiles, TempHandle};

/// A real temporary file whose path the test controls.
///
/// Install [`ObservableTempFile::factory`] as a backend's temp-file
/// capability and every temp file the code under test creates resolves to
/// this one file, with the handle's own delete-on-drop suppressed so the
/// test can inspect it. On drop the fixture unlinks the file itself; a file
/// that is already gone (some code paths delete their payload) counts as
/// success, while any other deletion error fails the test.
pub struct ObservableTempFile {
    path: PathBuf,
}

impl ObservableTempFile {
    pub fn new() -> io::Result<Self> {
        let file = tempfile::NamedTempFile::new()?;
        // Disable tempfile's own cleanup; this fixture owns the unlink.
        let (_file, path) = file.keep().map_err(|e| e.error)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What the code under test wrote into the file.
    pub fn contents(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// A [`TempFiles`] implementation that always hands out this file, as a
    /// borrowed handle that never deletes it.
    pub fn factory(&self) -> Arc<dyn TempFiles> {
        Arc::new(ObservedFactory {
            path: self.path.clone(),
        })
    }
}

impl Drop for ObservableTempFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                if !std::thread::panicking() {
                    panic!(
                        "failed to remove observable temp file {}: {e}",
                        self.path.display()
                    );
                }
            }
        }
    }
}

struct ObservedFactory {
    path: PathBuf,
}

impl TempFiles for ObservedFactory {
    fn create(&self) -> io::Result<TempHandle> {
        Ok(TempHandle::borrowed(self.path.clone()))
    }
}

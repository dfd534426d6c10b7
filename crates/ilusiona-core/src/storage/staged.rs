//! Temp file that is either renamed into place or removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::remove_if_exists;

/// A temp file being written. Call `finalize` to publish it or `discard` to
/// remove it.
pub struct StagedFile {
    file: File,
    temp_path: PathBuf,
}

impl StagedFile {
    /// Create (or truncate a stale) temp file at `temp_path`.
    pub fn create(temp_path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        Ok(StagedFile {
            file,
            temp_path: temp_path.to_path_buf(),
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)
    }

    /// Sync file data to disk. Call before `finalize` for durability.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_all()
    }

    /// Atomically rename the temp file to `final_path`, replacing any existing
    /// file. On failure the temp file is removed.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let StagedFile { file, temp_path } = self;
        drop(file);
        if let Err(e) = std::fs::rename(&temp_path, final_path) {
            if let Err(cleanup) = remove_if_exists(&temp_path) {
                tracing::warn!(path = %temp_path.display(), "could not remove temp file: {}", cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Close and delete the temp file.
    pub fn discard(self) {
        let StagedFile { file, temp_path } = self;
        drop(file);
        if let Err(e) = remove_if_exists(&temp_path) {
            tracing::warn!(path = %temp_path.display(), "could not remove temp file: {}", e);
        }
    }
}

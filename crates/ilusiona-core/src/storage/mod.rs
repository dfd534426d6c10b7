//! Disk I/O and file lifecycle.
//!
//! Artifacts are written to a `.tmp` sibling first and only become visible at
//! the final path through an atomic rename, so an interrupted run never
//! leaves a partial file at the destination.

mod staged;

pub use staged::StagedFile;

use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path for the temp file: appends `.tmp` to the final path (e.g. `x.png` → `x.png.tmp`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// True if a regular file with at least one byte exists at `path`.
/// Content is not inspected.
pub fn is_cached(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Remove `path`, treating "already gone" as success.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

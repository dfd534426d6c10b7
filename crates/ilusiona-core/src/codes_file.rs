//! Line-per-code text files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::storage::{self, StagedFile};

/// Write one code per line (`\n` terminated) via temp file + rename.
pub fn write_codes_file<S: AsRef<str>>(path: &Path, codes: &[S]) -> Result<()> {
    let mut contents = String::with_capacity(codes.len() * 15);
    for code in codes {
        contents.push_str(code.as_ref());
        contents.push('\n');
    }

    let temp = storage::temp_path(path);
    let mut staged = StagedFile::create(&temp)
        .with_context(|| format!("create codes file: {}", temp.display()))?;
    if let Err(e) = staged.write_all(contents.as_bytes()).and_then(|()| staged.sync()) {
        staged.discard();
        return Err(e).with_context(|| format!("write codes file: {}", temp.display()));
    }
    staged
        .finalize(path)
        .with_context(|| format!("rename codes file into {}", path.display()))?;
    tracing::info!(count = codes.len(), path = %path.display(), "wrote codes file");
    Ok(())
}

/// Read a codes file: one entry per non-blank line, surrounding whitespace
/// trimmed. Entries are not validated here.
pub fn read_codes_file(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read codes file: {}", path.display()))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

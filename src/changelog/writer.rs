//! Write the changelog to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ChangelogError;

/// Write `content` to `path` atomically, replacing any previous file.
///
/// Returns the number of lines written.
pub fn write_changelog(path: &Path, content: &str) -> Result<usize, ChangelogError> {
    write_atomic(path, content).map_err(ChangelogError::WriteFailed)?;
    Ok(content.lines().count())
}

/// Write through a temp file in the target directory, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

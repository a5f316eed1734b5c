//! Atomic file replacement.
//!
//! The destination is never written in place: content goes to a temporary
//! file in the same directory, which is renamed over the destination once it
//! is complete and synced. Readers see either the old file or the new one.

use crate::common::error::{Error, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Write `dest` atomically through `write`.
///
/// The temporary file is named `<stem>_XXXXXX.pptx`. If `write` or any later
/// step fails, the temporary file is removed and the failure is returned as
/// [`Error::Save`]; `dest` keeps its previous content.
pub fn save_atomic<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    save_inner(dest, write).map_err(|source| Error::Save {
        path: dest.to_path_buf(),
        source: Box::new(source),
    })
}

fn parent_dir(dest: &Path) -> PathBuf {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn save_inner<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = parent_dir(dest);
    fs::create_dir_all(&dir)?;

    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!("{}_", stem))
        .suffix(".pptx")
        .tempfile_in(&dir)?;
    tracing::debug!(tmp = %tmp.path().display(), dest = %dest.display(), "writing temporary file");

    // Dropping `tmp` on any early return deletes the temporary file.
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;

    tmp.persist(dest).map_err(|e| {
        // `e.file` is dropped here, removing the temporary file
        Error::Io(e.error)
    })?;

    tracing::info!(path = %dest.display(), "saved");
    Ok(())
}

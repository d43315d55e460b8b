//! File system helpers.
//!
//! Small wrappers around `std::fs` that attach path context to errors and
//! write files atomically so that a template is never observed half-written.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Ensure a directory exists, creating it and all parents if necessary.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or if the
/// directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
        return Ok(());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Atomically write bytes to a file using a write-then-rename strategy.
///
/// The content goes to a temporary file in the target directory, is synced
/// to disk, and is then renamed over the target. Parent directories are
/// created as needed.
///
/// # Errors
///
/// Returns an error if any step of the write fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Copy a file unless the destination already exists.
///
/// Returns `true` if the file was copied.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub fn copy_if_absent(src: &Path, dst: &Path) -> Result<bool> {
    if dst.exists() {
        return Ok(false);
    }
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(true)
}

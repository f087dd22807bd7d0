//! File system operations
//!
//! Low-level helpers shared by the storage operations: existence lookups
//! and atomic file replacement.

use log::warn;
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of in-flight upload files. Listings hide these.
pub const TEMP_PREFIX: &str = ".upload-";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Whether an I/O error means the path is simply not there
pub fn is_missing(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Metadata of the entry itself (symlinks not followed), or `None` if absent
pub fn lookup(path: &Path) -> io::Result<Option<Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Metadata with symlinks followed, or `None` if absent
pub fn lookup_followed(path: &Path) -> io::Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Temporary upload file, removed on drop unless persisted.
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if !is_missing(&e) {
                warn!(
                    "Failed to remove temporary file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

fn temp_path_in(dir: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(
        "{}{}-{}-{}",
        TEMP_PREFIX,
        std::process::id(),
        nanos,
        sequence
    ))
}

/// Writes `content` to `dest` so that readers only ever see the old file or
/// the complete new one.
///
/// The data goes to a temporary file in the destination directory, is synced,
/// then renamed over `dest`. On any failure the temporary file is removed.
/// Returns the number of bytes written.
pub fn write_atomically(dest: &Path, content: &[u8]) -> io::Result<u64> {
    let dir = dest
        .parent()
        .ok_or_else(|| io::Error::other("destination has no parent directory"))?;

    let temp_path = temp_path_in(dir);
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    let mut temp = TempFile {
        path: temp_path,
        persisted: false,
    };

    file.write_all(content)?;
    file.flush()?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp.path, dest)?;
    temp.persisted = true;

    Ok(content.len() as u64)
}

//! Path validation
//!
//! Resolves untrusted, client-supplied relative paths against the storage
//! root. Every operation that touches a client-named location goes through
//! here; nothing resolved by this module lies outside the root.

use log::warn;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;
use crate::storage::filesystem::is_missing;

/// Characters treated as path separators in client input
pub const SEPARATORS: [char; 2] = ['/', '\\'];

/// Split raw client input into plain name segments.
///
/// Rejects NUL bytes, absolute markers and `..` segments before any
/// filesystem call is made. Empty and `.` segments are dropped.
fn split_segments(raw: &str) -> Result<Vec<&str>, StorageError> {
    if raw.contains('\0') {
        warn!("Rejected path containing a null byte: {:?}", raw);
        return Err(StorageError::InvalidPath("path contains a null byte".into()));
    }

    if raw.starts_with(SEPARATORS) {
        warn!("Rejected absolute path: {:?}", raw);
        return Err(StorageError::InvalidPath(format!(
            "absolute paths are not allowed: {}",
            raw
        )));
    }

    let mut segments = Vec::new();
    for segment in raw.split(SEPARATORS) {
        match segment {
            "" | "." => continue,
            ".." => {
                warn!("Path traversal attempt detected: {:?}", raw);
                return Err(StorageError::InvalidPath(format!(
                    "parent directory segments are not allowed: {}",
                    raw
                )));
            }
            _ => {
                // Drive letters and UNC prefixes only parse as such on Windows
                let mut components = Path::new(segment).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => segments.push(segment),
                    _ => {
                        warn!("Rejected path prefix component in {:?}", raw);
                        return Err(StorageError::InvalidPath(format!(
                            "absolute paths are not allowed: {}",
                            raw
                        )));
                    }
                }
            }
        }
    }

    Ok(segments)
}

fn ensure_within(root: &Path, path: &Path, raw: &str) -> Result<(), StorageError> {
    if path.starts_with(root) {
        Ok(())
    } else {
        warn!(
            "Path {:?} resolved to {} outside storage root {}",
            raw,
            path.display(),
            root.display()
        );
        Err(StorageError::InvalidPath(format!(
            "path escapes the storage root: {}",
            raw
        )))
    }
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the
/// missing tail.
fn canonicalize_existing(root: &Path, path: &Path, raw: &str) -> Result<PathBuf, StorageError> {
    let mut existing = path;
    let mut missing = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(canonical) => {
                ensure_within(root, &canonical, raw)?;
                let mut resolved = canonical;
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(e) if is_missing(&e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Err(StorageError::Io(e)),
            },
            Err(e) => return Err(StorageError::Io(e)),
        }
    }
}

/// Check that an existing final component does not lead out of the root.
fn verify_final(root: &Path, path: &Path, raw: &str) -> Result<(), StorageError> {
    match path.canonicalize() {
        Ok(canonical) => ensure_within(root, &canonical, raw),
        Err(e) if is_missing(&e) => Ok(()),
        Err(e) => Err(StorageError::Io(e)),
    }
}

/// Resolves a client path to an absolute path inside `root`.
///
/// `root` must already be canonical. Empty input (or only `.` segments)
/// resolves to the root itself. Parent directories come back canonical;
/// the final component is kept as named, so a symlink stays a symlink.
pub fn resolve_path(root: &Path, raw: &str) -> Result<PathBuf, StorageError> {
    let segments = split_segments(raw)?;

    let Some((last, parents)) = segments.split_last() else {
        return Ok(root.to_path_buf());
    };

    let mut dir = root.to_path_buf();
    dir.extend(parents);
    let dir = canonicalize_existing(root, &dir, raw)?;

    let resolved = dir.join(last);
    verify_final(root, &resolved, raw)?;
    Ok(resolved)
}

/// Like [`resolve_path`], for operations that need a concrete entry below
/// the root (delete, rename, download, mkdir).
pub fn resolve_target(root: &Path, raw: &str) -> Result<PathBuf, StorageError> {
    let resolved = resolve_path(root, raw)?;
    if resolved == root {
        return Err(StorageError::InvalidPath(
            "a target below the storage root is required".into(),
        ));
    }
    Ok(resolved)
}

/// Resolves a single name inside an already resolved directory.
pub fn resolve_child(root: &Path, dir: &Path, name: &str) -> Result<PathBuf, StorageError> {
    match split_segments(name)?.as_slice() {
        [segment] if *segment == name => {}
        _ => {
            return Err(StorageError::InvalidPath(format!(
                "not a plain file name: {}",
                name
            )));
        }
    }

    ensure_within(root, dir, name)?;
    let resolved = dir.join(name);
    verify_final(root, &resolved, name)?;
    Ok(resolved)
}

/// Root-relative display form of a resolved path, e.g. `/docs/a.txt`
pub fn virtual_path(root: &Path, real_path: &Path) -> String {
    match real_path.strip_prefix(root) {
        Ok(relative) => format!("/{}", relative.to_string_lossy()),
        Err(_) => String::from("/"),
    }
}

/// Build an `io::Error` for a path that is not a directory
pub fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotADirectory,
        format!("not a directory: {}", path.display()),
    )
}

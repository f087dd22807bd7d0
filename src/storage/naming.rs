//! File naming
//!
//! Turns client-declared file names into safe on-disk names.

use crate::error::StorageError;
use crate::storage::validation::SEPARATORS;

/// Name used when normalization leaves nothing usable
pub const FALLBACK_NAME: &str = "untitled";

/// Longest file name accepted, in bytes
pub const MAX_NAME_LENGTH: usize = 255;

/// Splits a name at its last `.` into base and extension.
///
/// The extension keeps its leading dot; a name without a dot has an empty
/// extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) => name.split_at(index),
        None => (name, ""),
    }
}

/// Derives a safe on-disk file name from a declared upload name.
///
/// Whitespace control characters such as tab and newline count as
/// whitespace. Path separators, other control characters and `..`
/// sequences are removed outright. The extension is kept verbatim; the base is lower-cased with
/// each whitespace run replaced by a single hyphen. Applying it twice gives
/// the same result as applying it once.
pub fn normalize_filename(declared: &str) -> String {
    let mut cleaned: String = declared
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control() && !SEPARATORS.contains(c))
        .collect();
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "");
    }

    let (base, extension) = split_extension(&cleaned);

    let mut normalized = String::with_capacity(cleaned.len());
    let mut in_whitespace = false;
    for c in base.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push('-');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }
    normalized.push_str(extension);

    if normalized.is_empty() || normalized == "." {
        return FALLBACK_NAME.to_string();
    }
    normalized
}

/// Final name for a rename: the requested name's own extension is dropped
/// and the source's extension is appended, so `report` or `report.pdf`
/// applied to `old.txt` both give `report.txt`.
pub fn inherit_extension(new_name: &str, old_name: &str) -> Result<String, StorageError> {
    if new_name.trim().is_empty() {
        return Err(StorageError::InvalidPath("new name is empty".into()));
    }
    if new_name.contains(SEPARATORS) || new_name.contains('\0') {
        return Err(StorageError::InvalidPath(format!(
            "new name must not contain path separators: {}",
            new_name
        )));
    }
    if new_name == "." || new_name == ".." {
        return Err(StorageError::InvalidPath(format!(
            "not a valid name: {}",
            new_name
        )));
    }

    let (base, _) = split_extension(new_name);
    if base.is_empty() {
        return Err(StorageError::InvalidPath(format!(
            "new name has no base: {}",
            new_name
        )));
    }

    let (_, extension) = split_extension(old_name);
    let renamed = format!("{}{}", base, extension);
    if renamed.len() > MAX_NAME_LENGTH {
        return Err(StorageError::InvalidInput(format!(
            "name longer than {} bytes",
            MAX_NAME_LENGTH
        )));
    }
    Ok(renamed)
}

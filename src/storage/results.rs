//! Storage result types
//!
//! Defines the listing projection and the result structures returned by
//! storage operations.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{File, Metadata};
use std::path::PathBuf;
use std::time::SystemTime;

/// Display format of `Entry::mod_time`, e.g. `02 Jan 2006 15:04:05`
pub const MOD_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// One directory entry as shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Base name only, never a path
    pub name: String,
    /// Size in bytes, 0 for directories
    pub size: u64,
    pub mod_time: String,
    pub is_dir: bool,
}

impl Entry {
    /// Project raw filesystem metadata into an entry
    pub fn from_metadata(name: String, metadata: &Metadata) -> Self {
        let is_dir = metadata.is_dir();
        Self {
            name,
            size: if is_dir { 0 } else { metadata.len() },
            mod_time: metadata
                .modified()
                .map(format_mod_time)
                .unwrap_or_default(),
            is_dir,
        }
    }
}

/// Format a modification time in local time
pub fn format_mod_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(MOD_TIME_FORMAT)
        .to_string()
}

/// Sort entries by name so listings are reproducible
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Result of a file storage operation
#[derive(Debug, Clone)]
pub struct StoreResult {
    /// Normalized name the file was stored under
    pub name: String,
    pub size: u64,
    pub file_path: PathBuf,
}

/// Result of a rename operation
#[derive(Debug, Clone)]
pub struct RenameResult {
    pub name: String,
    pub file_path: PathBuf,
}

/// Result of a file retrieval operation
#[derive(Debug)]
pub struct RetrieveResult {
    pub file: File,
    /// Base name of the resolved path, safe to suggest to the client
    pub file_name: String,
    pub size: u64,
}

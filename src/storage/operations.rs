//! Storage operations
//!
//! The file operations offered to clients: list, upload, delete, rename,
//! download and mkdir. Each one resolves its client-supplied target through
//! the path validation module before touching the filesystem, and re-reads
//! the filesystem on every call; nothing is cached.

use log::{error, info};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::filesystem::{
    TEMP_PREFIX, is_missing, lookup, lookup_followed, write_atomically,
};
use crate::storage::naming::{MAX_NAME_LENGTH, inherit_extension, normalize_filename};
use crate::storage::results::{Entry, RenameResult, RetrieveResult, StoreResult, sort_entries};
use crate::storage::validation::{
    not_a_directory, resolve_child, resolve_path, resolve_target, virtual_path,
};

/// File operations confined to a single storage root.
///
/// The root is canonicalized once in [`FileStore::open`] and never changes.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_upload_bytes: u64,
    reserved_names: Vec<String>,
}

impl FileStore {
    /// Opens the storage root, creating it if it does not exist yet.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "storage root is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self {
            root,
            max_upload_bytes: u64::MAX,
            reserved_names: Vec::new(),
        })
    }

    /// Limit the size of uploaded files
    pub fn with_max_upload_bytes(mut self, limit: u64) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Directory names that may not be created directly under the root
    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Rejects a directory whose top-level component is a reserved name
    fn ensure_not_reserved(&self, dir_path: &Path) -> Result<(), StorageError> {
        let top_level = dir_path
            .strip_prefix(&self.root)
            .ok()
            .and_then(|relative| relative.components().next())
            .map(|component| component.as_os_str().to_string_lossy().into_owned());

        match top_level {
            Some(name) if self.reserved_names.contains(&name) => {
                Err(StorageError::InvalidPath(format!("name is reserved: /{}", name)))
            }
            _ => Ok(()),
        }
    }

    /// Lists a directory, sorted by name.
    pub fn list(&self, raw_path: &str) -> Result<Vec<Entry>, StorageError> {
        let real_path = resolve_path(&self.root, raw_path)?;
        let virtual_dir = virtual_path(&self.root, &real_path);

        let metadata = lookup_followed(&real_path)?
            .ok_or_else(|| StorageError::NotFound(virtual_dir.clone()))?;
        if !metadata.is_dir() {
            return Err(StorageError::Io(not_a_directory(Path::new(&virtual_dir))));
        }

        let read_dir = fs::read_dir(&real_path).map_err(|e| {
            error!(
                "Failed to list directory {} (real: {}): {}",
                virtual_dir,
                real_path.display(),
                e
            );
            StorageError::Io(e)
        })?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(TEMP_PREFIX) {
                continue;
            }

            // Symlinks report their target only when it stays inside the root
            let link_metadata = dir_entry.metadata()?;
            let metadata = if link_metadata.is_symlink() {
                match fs::canonicalize(dir_entry.path()) {
                    Ok(target) if target.starts_with(&self.root) => {
                        fs::metadata(&target).unwrap_or(link_metadata)
                    }
                    _ => link_metadata,
                }
            } else {
                link_metadata
            };
            entries.push(Entry::from_metadata(name, &metadata));
        }
        sort_entries(&mut entries);

        info!(
            "Listed directory {} (real: {}) - {} entries",
            virtual_dir,
            real_path.display(),
            entries.len()
        );

        Ok(entries)
    }

    /// Stores an upload in the storage root under its normalized name.
    ///
    /// An existing file with the same name is replaced. The replacement is
    /// atomic: concurrent uploads of one name leave whichever finished last.
    pub fn upload(&self, declared_name: &str, content: &[u8]) -> Result<StoreResult, StorageError> {
        self.upload_to("", declared_name, content)
    }

    /// Like [`FileStore::upload`], into an existing directory below the root.
    pub fn upload_to(
        &self,
        raw_dir: &str,
        declared_name: &str,
        content: &[u8],
    ) -> Result<StoreResult, StorageError> {
        if content.len() as u64 > self.max_upload_bytes {
            return Err(StorageError::InvalidInput(format!(
                "file exceeds the upload limit of {} bytes",
                self.max_upload_bytes
            )));
        }

        let file_name = normalize_filename(declared_name);
        if file_name.len() > MAX_NAME_LENGTH {
            return Err(StorageError::InvalidInput(format!(
                "file name longer than {} bytes",
                MAX_NAME_LENGTH
            )));
        }
        if file_name.starts_with(TEMP_PREFIX) {
            return Err(StorageError::InvalidInput(format!(
                "file name uses a reserved prefix: {}",
                file_name
            )));
        }

        let dir = resolve_path(&self.root, raw_dir)?;
        match lookup_followed(&dir)? {
            Some(metadata) if metadata.is_dir() => {}
            _ => {
                return Err(StorageError::NotFound(virtual_path(&self.root, &dir)));
            }
        }

        let file_path = resolve_child(&self.root, &dir, &file_name)?;
        let virtual_file_path = virtual_path(&self.root, &file_path);
        if let Some(existing) = lookup(&file_path)? {
            if existing.is_dir() {
                return Err(StorageError::Conflict(virtual_file_path));
            }
        }

        let size = write_atomically(&file_path, content).map_err(|e| {
            error!(
                "Failed to store {} (virtual: {}, real: {}): {}",
                declared_name,
                virtual_file_path,
                file_path.display(),
                e
            );
            StorageError::Io(e)
        })?;

        info!(
            "Stored {:?} as {} ({} bytes, real: {})",
            declared_name,
            virtual_file_path,
            size,
            file_path.display()
        );

        Ok(StoreResult {
            name: file_name,
            size,
            file_path,
        })
    }

    /// Deletes a file or directory.
    ///
    /// Directories must be empty unless `recursive` is set. Deleting an absent
    /// target is `NotFound`, including a repeated delete of the same path.
    pub fn delete(&self, raw_path: &str, recursive: bool) -> Result<(), StorageError> {
        let file_path = resolve_target(&self.root, raw_path)?;
        let virtual_file_path = virtual_path(&self.root, &file_path);

        let metadata =
            lookup(&file_path)?.ok_or_else(|| StorageError::NotFound(virtual_file_path.clone()))?;

        let result = if metadata.is_dir() {
            if recursive {
                fs::remove_dir_all(&file_path)
            } else {
                fs::remove_dir(&file_path)
            }
        } else {
            fs::remove_file(&file_path)
        };

        result.map_err(|e| {
            error!(
                "Failed to delete {} (real: {}): {}",
                virtual_file_path,
                file_path.display(),
                e
            );
            StorageError::Io(e)
        })?;

        info!(
            "Deleted {} (real: {})",
            virtual_file_path,
            file_path.display()
        );
        Ok(())
    }

    /// Renames an entry within its directory.
    ///
    /// The source's extension always carries over to the new name (see
    /// [`inherit_extension`]). An existing destination is a conflict unless
    /// `overwrite` is set.
    pub fn rename(
        &self,
        old_raw_path: &str,
        new_name: &str,
        overwrite: bool,
    ) -> Result<RenameResult, StorageError> {
        let old_path = resolve_target(&self.root, old_raw_path)?;
        let virtual_old_path = virtual_path(&self.root, &old_path);

        if lookup(&old_path)?.is_none() {
            return Err(StorageError::NotFound(virtual_old_path));
        }

        let old_name = old_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let final_name = inherit_extension(new_name, &old_name)?;

        let parent = old_path
            .parent()
            .ok_or_else(|| StorageError::InvalidPath(virtual_old_path.clone()))?;
        let new_path = resolve_child(&self.root, parent, &final_name)?;
        let virtual_new_path = virtual_path(&self.root, &new_path);
        if lookup_followed(&old_path)?.is_some_and(|metadata| metadata.is_dir()) {
            self.ensure_not_reserved(&new_path)?;
        }

        if new_path == old_path {
            if overwrite {
                return Ok(RenameResult {
                    name: final_name,
                    file_path: new_path,
                });
            }
            return Err(StorageError::Conflict(virtual_new_path));
        }
        if !overwrite && lookup(&new_path)?.is_some() {
            return Err(StorageError::Conflict(virtual_new_path));
        }

        fs::rename(&old_path, &new_path).map_err(|e| {
            error!(
                "Failed to rename {} to {}: {}",
                old_path.display(),
                new_path.display(),
                e
            );
            StorageError::Io(e)
        })?;

        info!("Renamed {} -> {}", virtual_old_path, virtual_new_path);

        Ok(RenameResult {
            name: final_name,
            file_path: new_path,
        })
    }

    /// Opens a file for download.
    ///
    /// The suggested file name is the base name of the resolved path, never
    /// the raw client input. Directories cannot be downloaded.
    pub fn download(&self, raw_path: &str) -> Result<RetrieveResult, StorageError> {
        let file_path = resolve_target(&self.root, raw_path)?;
        let virtual_file_path = virtual_path(&self.root, &file_path);

        // Size and kind are read from the open handle
        let file = File::open(&file_path).map_err(|e| {
            if is_missing(&e) {
                StorageError::NotFound(virtual_file_path.clone())
            } else {
                error!("Failed to open {}: {}", file_path.display(), e);
                StorageError::Io(e)
            }
        })?;
        let metadata = file.metadata()?;
        if metadata.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "directories cannot be downloaded: {}",
                virtual_file_path
            )));
        }

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(
            "Prepared download of {} ({} bytes, real: {})",
            virtual_file_path,
            metadata.len(),
            file_path.display()
        );

        Ok(RetrieveResult {
            file,
            file_name,
            size: metadata.len(),
        })
    }

    /// Creates a directory.
    ///
    /// Missing intermediate directories are an error unless `parents` is set.
    pub fn mkdir(&self, raw_path: &str, parents: bool) -> Result<(), StorageError> {
        let dir_path = resolve_target(&self.root, raw_path)?;
        let virtual_dir_path = virtual_path(&self.root, &dir_path);

        if lookup(&dir_path)?.is_some() {
            return Err(StorageError::Conflict(virtual_dir_path));
        }
        self.ensure_not_reserved(&dir_path)?;

        let result = if parents {
            fs::create_dir_all(&dir_path)
        } else {
            fs::create_dir(&dir_path)
        };

        result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                return StorageError::Conflict(virtual_dir_path.clone());
            }
            error!(
                "Failed to create directory {} (real: {}): {}",
                virtual_dir_path,
                dir_path.display(),
                e
            );
            StorageError::Io(e)
        })?;

        info!(
            "Created directory {} (real: {})",
            virtual_dir_path,
            dir_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        (tmp, store)
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn read_all(result: RetrieveResult) -> Vec<u8> {
        let mut content = Vec::new();
        let mut file = result.file;
        file.read_to_end(&mut content).unwrap();
        content
    }

    #[test]
    fn test_open_creates_missing_root() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path().join("db/nested")).unwrap();
        assert!(store.root().is_dir());
        assert!(store.root().is_absolute());
    }

    #[test]
    fn test_upload_normalizes_name_and_lists_it() {
        let (_tmp, store) = setup();

        let stored = store.upload("My File.TXT", b"hello").unwrap();
        assert_eq!(stored.name, "my-file.TXT");
        assert_eq!(stored.size, 5);

        let entries = store.list("").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "my-file.TXT");
        assert_eq!(entries[0].size, 5);
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn test_upload_then_download_round_trips() {
        let (_tmp, store) = setup();
        let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();

        let stored = store.upload("data.bin", &content).unwrap();
        let retrieved = store.download(&stored.name).unwrap();
        assert_eq!(retrieved.file_name, "data.bin");
        assert_eq!(retrieved.size, content.len() as u64);
        assert_eq!(read_all(retrieved), content);
    }

    #[test]
    fn test_upload_overwrites_existing_file() {
        let (_tmp, store) = setup();
        store.upload("notes.txt", b"first").unwrap();
        store.upload("Notes.txt", b"second").unwrap();

        assert_eq!(names(&store.list("").unwrap()), ["notes.txt"]);
        assert_eq!(read_all(store.download("notes.txt").unwrap()), b"second");
    }

    #[test]
    fn test_upload_never_leaves_the_root() {
        let (_tmp, store) = setup();
        let stored = store.upload("../../evil.sh", b"#!").unwrap();
        assert_eq!(stored.name, "evil.sh");
        assert_eq!(stored.file_path, store.root().join("evil.sh"));
    }

    #[test]
    fn test_upload_into_subdirectory() {
        let (_tmp, store) = setup();
        store.mkdir("docs", false).unwrap();

        store.upload_to("docs", "Q1 Report.PDF", b"pdf").unwrap();
        assert_eq!(names(&store.list("docs").unwrap()), ["q1-report.PDF"]);

        assert!(matches!(
            store.upload_to("missing", "a.txt", b""),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.upload_to("../outside", "a.txt", b""),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_upload_limits() {
        let (_tmp, store) = setup();
        let store = store.with_max_upload_bytes(4);
        assert!(matches!(
            store.upload("big.bin", b"12345"),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(store.upload("ok.bin", b"1234").is_ok());

        let long_name = format!("{}.txt", "a".repeat(300));
        assert!(matches!(
            store.upload(&long_name, b""),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            store.upload(".upload-sneaky", b""),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_upload_onto_directory_conflicts() {
        let (_tmp, store) = setup();
        store.mkdir("photos", false).unwrap();
        assert!(matches!(
            store.upload("Photos", b"x"),
            Err(StorageError::Conflict(_))
        ));
    }

    #[test]
    fn test_list_errors() {
        let (_tmp, store) = setup();
        store.upload("file.txt", b"x").unwrap();

        assert!(matches!(store.list("nope"), Err(StorageError::NotFound(_))));
        assert!(matches!(store.list("../"), Err(StorageError::InvalidPath(_))));
        assert!(matches!(store.list("file.txt"), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_list_is_sorted_and_hides_temp_files() {
        let (_tmp, store) = setup();
        store.upload("zeta.txt", b"z").unwrap();
        store.upload("alpha.txt", b"a").unwrap();
        store.mkdir("middle", false).unwrap();
        fs::write(store.root().join(".upload-123-456-0"), b"partial").unwrap();

        let entries = store.list("").unwrap();
        assert_eq!(names(&entries), ["alpha.txt", "middle", "zeta.txt"]);
        assert!(entries[1].is_dir);
        assert_eq!(entries[1].size, 0);
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let (_tmp, store) = setup();
        store.upload("gone.txt", b"x").unwrap();

        store.delete("gone.txt", false).unwrap();
        assert!(matches!(
            store.delete("gone.txt", false),
            Err(StorageError::NotFound(_))
        ));
        assert!(store.list("").unwrap().is_empty());
    }

    #[test]
    fn test_delete_rejects_traversal_and_root() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path().join("root")).unwrap();
        fs::write(tmp.path().join("sibling.txt"), "keep").unwrap();

        assert!(matches!(
            store.delete("../sibling.txt", false),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.delete("../../etc/passwd", false),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(store.delete("", true), Err(StorageError::InvalidPath(_))));
        assert!(matches!(store.delete(".", true), Err(StorageError::InvalidPath(_))));
        assert!(tmp.path().join("sibling.txt").exists());
        assert!(store.root().exists());
    }

    #[test]
    fn test_delete_directories() {
        let (_tmp, store) = setup();
        store.mkdir("empty", false).unwrap();
        store.mkdir("full/inner", true).unwrap();

        store.delete("empty", false).unwrap();
        assert!(matches!(store.delete("full", false), Err(StorageError::Io(_))));
        assert!(store.root().join("full/inner").is_dir());

        store.delete("full", true).unwrap();
        assert!(store.list("").unwrap().is_empty());
    }

    #[test]
    fn test_rename_inherits_old_extension() {
        let (_tmp, store) = setup();
        store.upload("old.txt", b"original").unwrap();

        let renamed = store.rename("old.txt", "report", false).unwrap();
        assert_eq!(renamed.name, "report.txt");
        assert_eq!(names(&store.list("").unwrap()), ["report.txt"]);

        let retrieved = store.download("report.txt").unwrap();
        assert_eq!(retrieved.file_name, "report.txt");
        assert_eq!(read_all(retrieved), b"original");

        // a caller-supplied extension is replaced, not appended to
        let renamed = store.rename("report.txt", "final.pdf", false).unwrap();
        assert_eq!(renamed.name, "final.txt");
    }

    #[test]
    fn test_rename_errors() {
        let (_tmp, store) = setup();
        store.upload("a.txt", b"a").unwrap();
        store.upload("b.txt", b"b").unwrap();

        assert!(matches!(
            store.rename("missing.txt", "x", false),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.rename("a.txt", "b", false),
            Err(StorageError::Conflict(_))
        ));
        assert!(matches!(
            store.rename("a.txt", "a", false),
            Err(StorageError::Conflict(_))
        ));
        assert!(matches!(
            store.rename("a.txt", "../escape", false),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.rename("../a.txt", "x", false),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.rename("", "x", false),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_rename_with_overwrite() {
        let (_tmp, store) = setup();
        store.upload("a.txt", b"from a").unwrap();
        store.upload("b.txt", b"from b").unwrap();

        store.rename("a.txt", "b", true).unwrap();
        assert_eq!(names(&store.list("").unwrap()), ["b.txt"]);
        assert_eq!(read_all(store.download("b.txt").unwrap()), b"from a");
    }

    #[test]
    fn test_rename_stays_in_source_directory() {
        let (_tmp, store) = setup();
        store.mkdir("docs", false).unwrap();
        store.upload_to("docs", "draft.md", b"# draft").unwrap();

        store.rename("docs/draft.md", "published", false).unwrap();
        assert_eq!(names(&store.list("docs").unwrap()), ["published.md"]);
        assert_eq!(names(&store.list("").unwrap()), ["docs"]);
    }

    #[test]
    fn test_download_errors() {
        let (_tmp, store) = setup();
        store.mkdir("folder", false).unwrap();

        assert!(matches!(
            store.download("folder"),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.download("absent.txt"),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.download("../../etc/passwd"),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_download_size_matches_open_handle() {
        let (_tmp, store) = setup();
        store.upload("a.bin", &[1u8; 10]).unwrap();

        let mut retrieved = store.download("a.bin").unwrap();
        store.upload("a.bin", &[2u8; 20]).unwrap();

        let mut content = Vec::new();
        retrieved.file.read_to_end(&mut content).unwrap();
        assert_eq!(retrieved.size, content.len() as u64);
        assert_eq!(content, [1u8; 10]);

        let mut retrieved = store.download("a.bin").unwrap();
        let mut content = Vec::new();
        retrieved.file.read_to_end(&mut content).unwrap();
        assert_eq!(retrieved.size, 20);
        assert_eq!(content.len(), 20);
    }

    #[test]
    fn test_reserved_top_level_names() {
        let (_tmp, store) = setup();
        let store = store.with_reserved_names(["upload", "mkdir"]);

        assert!(matches!(
            store.mkdir("upload", false),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.mkdir("mkdir/inner", true),
            Err(StorageError::InvalidPath(_))
        ));
        store.mkdir("nested/upload", true).unwrap();

        store.mkdir("docs", false).unwrap();
        assert!(matches!(
            store.rename("docs", "upload", false),
            Err(StorageError::InvalidPath(_))
        ));
        store.rename("nested/upload", "mkdir", false).unwrap();

        // Plain files never shadow a listing
        store.upload("notes", b"x").unwrap();
        store.rename("notes", "upload", false).unwrap();
        assert_eq!(names(&store.list("").unwrap()), ["docs", "nested", "upload"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_does_not_follow_symlinks_out_of_root() {
        use std::os::unix::fs::symlink;

        let (tmp, store) = setup();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.bin"), vec![0u8; 10_000]).unwrap();
        fs::create_dir(outside.path().join("elsewhere")).unwrap();

        symlink(outside.path().join("secret.bin"), tmp.path().join("leak")).unwrap();
        symlink(outside.path().join("elsewhere"), tmp.path().join("away")).unwrap();
        store.upload("inside.txt", b"12345").unwrap();
        symlink(tmp.path().join("inside.txt"), tmp.path().join("alias")).unwrap();

        let entries = store.list("").unwrap();
        let by_name = |name: &str| entries.iter().find(|e| e.name == name).unwrap();

        assert_ne!(by_name("leak").size, 10_000);
        assert!(!by_name("away").is_dir);
        assert_eq!(by_name("alias").size, 5);
    }

    #[test]
    fn test_mkdir() {
        let (_tmp, store) = setup();

        store.mkdir("projects", false).unwrap();
        assert!(matches!(
            store.mkdir("projects", false),
            Err(StorageError::Conflict(_))
        ));
        assert!(matches!(
            store.mkdir("a/b/c", false),
            Err(StorageError::Io(_))
        ));
        store.mkdir("a/b/c", true).unwrap();
        assert!(store.root().join("a/b/c").is_dir());

        assert!(matches!(
            store.mkdir("../outside", true),
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(store.mkdir("", false), Err(StorageError::InvalidPath(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_removes_link_only() {
        use std::os::unix::fs::symlink;

        let (_tmp, store) = setup();
        store.upload("target.txt", b"keep me").unwrap();
        symlink(store.root().join("target.txt"), store.root().join("link.txt")).unwrap();

        store.delete("link.txt", false).unwrap();
        assert_eq!(names(&store.list("").unwrap()), ["target.txt"]);
    }
}

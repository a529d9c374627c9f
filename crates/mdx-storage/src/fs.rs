//! Filesystem storage backend.
//!
//! Walks a docs directory and returns relative paths for every recognized
//! document source. Hidden entries, underscore-prefixed files and configured
//! skip markers (nested-app directories such as `node_modules`) are excluded
//! during the walk so a docs tree containing a generated viewer app never
//! feeds its own sources back into the scan.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::storage::{FileEntry, Storage, StorageError, StorageErrorKind};

/// Extensions collected by the scan.
const SCAN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Directory names that are never descended into. `docs-app` is the
/// generated viewer app embedded in the docs tree.
const DEFAULT_SKIP_MARKERS: [&str; 2] = ["node_modules", "docs-app"];

/// Filesystem-backed [`Storage`] implementation.
pub struct FsStorage {
    root: PathBuf,
    skip_markers: Vec<String>,
}

impl FsStorage {
    /// Create a filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            skip_markers: DEFAULT_SKIP_MARKERS.map(String::from).to_vec(),
        }
    }

    /// Replace the directory skip markers.
    ///
    /// Directories whose name matches a marker are not descended into.
    #[must_use]
    pub fn with_skip_markers(mut self, markers: Vec<String>) -> Self {
        self.skip_markers = markers;
        self
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative source path against the root.
    ///
    /// Rejects absolute paths and paths with `..` components so a request can
    /// never escape the docs root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if rel.as_os_str().is_empty() || escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_backend("Fs")
                .with_path(path));
        }
        Ok(self.root.join(rel))
    }

    /// Recursively collect document files under `dir`.
    fn scan_directory(&self, dir: &Path, prefix: &str, entries: &mut Vec<FileEntry>) {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Unreadable directory skipped");
                return;
            }
        };

        for entry in read_dir.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            if is_dir {
                if self.skip_markers.iter().any(|m| m == &name) {
                    continue;
                }
                self.scan_directory(&entry.path(), &rel, entries);
            } else if has_scan_extension(&name) {
                entries.push(FileEntry::new(rel));
            }
        }
    }
}

/// Check whether a file name carries a recognized document extension.
fn has_scan_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<FileEntry>, StorageError> {
        let mut entries = Vec::new();
        if self.root.exists() {
            self.scan_directory(&self.root, "", &mut entries);
        }
        // Deterministic order independent of directory iteration order
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend("Fs"))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|full| full.is_file())
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        let full = self.resolve(path)?;
        let metadata = full
            .metadata()
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend("Fs"))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend("Fs"))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_storage(files: &[(&str, &str)]) -> (tempfile::TempDir, FsStorage) {
        let temp = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        let storage = FsStorage::new(temp.path().to_path_buf());
        (temp, storage)
    }

    fn paths(entries: &[FileEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_missing_root_returns_empty() {
        let temp = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp.path().join("nonexistent"));

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_collects_md_and_mdx() {
        let (_temp, storage) = create_storage(&[
            ("guide.md", "# Guide"),
            ("intro.mdx", "# Intro"),
            ("styles.css", "body {}"),
        ]);

        let entries = storage.scan().unwrap();

        assert_eq!(paths(&entries), vec!["guide.md", "intro.mdx"]);
    }

    #[test]
    fn test_scan_recurses_into_subdirectories() {
        let (_temp, storage) = create_storage(&[
            ("guide/index.md", "# Guide"),
            ("guide/setup.md", "# Setup"),
        ]);

        let entries = storage.scan().unwrap();

        assert_eq!(paths(&entries), vec!["guide/index.md", "guide/setup.md"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_underscore_entries() {
        let (_temp, storage) = create_storage(&[
            (".hidden.md", "# Hidden"),
            ("_partial.md", "# Partial"),
            ("visible.md", "# Visible"),
        ]);

        let entries = storage.scan().unwrap();

        assert_eq!(paths(&entries), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_skips_marker_directories() {
        let (_temp, storage) = create_storage(&[
            ("node_modules/pkg/readme.md", "# Pkg"),
            ("docs-app/embedded.md", "# Embedded"),
            ("guide.md", "# Guide"),
        ]);

        let entries = storage.scan().unwrap();

        assert_eq!(paths(&entries), vec!["guide.md"]);
    }

    #[test]
    fn test_scan_custom_skip_markers() {
        let (temp, _) = create_storage(&[
            ("internal/notes.md", "# Notes"),
            ("guide.md", "# Guide"),
        ]);
        let storage = FsStorage::new(temp.path().to_path_buf())
            .with_skip_markers(vec!["internal".to_owned()]);

        let entries = storage.scan().unwrap();

        assert_eq!(paths(&entries), vec!["guide.md"]);
    }

    #[test]
    fn test_read_returns_content() {
        let (_temp, storage) = create_storage(&[("guide.md", "# Guide\n\nContent.")]);

        assert_eq!(storage.read("guide.md").unwrap(), "# Guide\n\nContent.");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let (_temp, storage) = create_storage(&[]);

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_read_rejects_traversal() {
        let (_temp, storage) = create_storage(&[("guide.md", "# Guide")]);

        let err = storage.read("../guide.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let (_temp, storage) = create_storage(&[("guide.md", "# Guide")]);

        assert!(storage.exists("guide.md"));
        assert!(!storage.exists("missing.md"));
    }

    #[test]
    fn test_mtime_is_positive() {
        let (_temp, storage) = create_storage(&[("guide.md", "# Guide")]);

        assert!(storage.mtime("guide.md").unwrap() > 0.0);
    }
}

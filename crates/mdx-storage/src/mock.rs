//! In-memory storage for testing.
//!
//! Unlike [`FsStorage`](crate::FsStorage), the mock returns every registered
//! path from `scan()` regardless of extension, mirroring the "flat mapping of
//! file paths" shape that loaders are expected to filter themselves.

use std::collections::BTreeMap;

use crate::storage::{FileEntry, Storage, StorageError};

/// In-memory [`Storage`] implementation for tests.
#[derive(Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
    mtimes: BTreeMap<String, f64>,
    fail_scan: bool,
}

impl MockStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file with content.
    #[must_use]
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_owned(), content.to_owned());
        self.mtimes.insert(path.to_owned(), 1.0);
        self
    }

    /// Register a file with an explicit mtime.
    #[must_use]
    pub fn with_file_mtime(mut self, path: &str, content: &str, mtime: f64) -> Self {
        self.files.insert(path.to_owned(), content.to_owned());
        self.mtimes.insert(path.to_owned(), mtime);
        self
    }

    /// Make `scan()` fail with a storage error.
    #[must_use]
    pub fn with_failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<FileEntry>, StorageError> {
        if self.fail_scan {
            return Err(StorageError::new(crate::StorageErrorKind::Other).with_backend("Mock"));
        }
        Ok(self.files.keys().map(FileEntry::new).collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        self.mtimes
            .get(path)
            .copied()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_scan_returns_registered_paths_sorted() {
        let storage = MockStorage::new()
            .with_file("b.md", "# B")
            .with_file("a.md", "# A");

        let entries = storage.scan().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path.to_string_lossy(), "a.md");
        assert_eq!(entries[1].path.to_string_lossy(), "b.md");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_failing_scan() {
        let storage = MockStorage::new().with_failing_scan();

        assert!(storage.scan().is_err());
    }

    #[test]
    fn test_mtime_roundtrip() {
        let storage = MockStorage::new().with_file_mtime("a.md", "# A", 42.0);

        assert_eq!(storage.mtime("a.md").unwrap(), 42.0);
    }
}

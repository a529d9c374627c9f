//! Atomically swappable site snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use mdx_storage::Storage;

use crate::index::DocumentIndex;
use crate::loader::{LoaderOptions, load_documents};
use crate::tree::{TreeNode, build_tree};

/// Milliseconds elapsed since `start`, for reload timing logs.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// One consistent view of the site: the document index and the
/// navigation tree built from the same scan.
#[derive(Debug)]
pub struct SiteSnapshot {
    pub index: DocumentIndex,
    pub tree: TreeNode,
}

impl SiteSnapshot {
    fn empty() -> Self {
        Self {
            index: DocumentIndex::new(Vec::new()),
            tree: build_tree(&[]),
        }
    }
}

/// Loads site snapshots from storage on demand.
///
/// # Thread Safety
///
/// Designed for concurrent access without external locking:
/// - Uses internal `RwLock<Arc<SiteSnapshot>>` for the current snapshot
/// - Uses `Mutex<()>` for serializing reload operations
/// - Uses `AtomicBool` for cache validity tracking
pub struct SiteLoader {
    storage: Arc<dyn Storage>,
    options: LoaderOptions,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<SiteSnapshot>>,
    /// Cache validity flag.
    cache_valid: AtomicBool,
}

impl SiteLoader {
    /// Create a loader. The initial snapshot is empty and marked stale,
    /// so the first [`reload_if_needed`](Self::reload_if_needed) call
    /// performs the scan.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, options: LoaderOptions) -> Self {
        Self {
            storage,
            options,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(SiteSnapshot::empty())),
            cache_valid: AtomicBool::new(false),
        }
    }

    /// Get the current snapshot without checking validity.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self) -> Arc<SiteSnapshot> {
        self.current.read().unwrap().clone()
    }

    /// Reload from storage if the current snapshot is stale.
    ///
    /// Uses double-checked locking:
    /// 1. Fast path: return current snapshot if still valid
    /// 2. Slow path: acquire `reload_lock`, recheck, then reload
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload_if_needed(&self) -> Arc<SiteSnapshot> {
        let start = Instant::now();

        // Fast path: cache valid
        if self.cache_valid.load(Ordering::Acquire) {
            return self.get();
        }

        // Slow path: acquire reload lock
        let _guard = self.reload_lock.lock().unwrap();

        // Double-check after acquiring lock
        if self.cache_valid.load(Ordering::Acquire) {
            return self.get();
        }

        let documents = load_documents(self.storage.as_ref(), &self.options);
        let snapshot = Arc::new(SiteSnapshot {
            tree: build_tree(&documents),
            index: DocumentIndex::new(documents),
        });

        *self.current.write().unwrap() = snapshot.clone();
        self.cache_valid.store(true, Ordering::Release);

        tracing::info!(
            documents = snapshot.index.len(),
            elapsed_ms = elapsed_ms(start),
            "Site reloaded"
        );
        snapshot
    }

    /// Mark the current snapshot stale so the next access reloads.
    pub fn invalidate(&self) {
        self.cache_valid.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdx_storage::MockStorage;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(super::SiteLoader: Send, Sync);

    fn loader_with_docs() -> SiteLoader {
        let storage = MockStorage::new()
            .with_file("docs/guide/intro.md", "# Intro")
            .with_file("docs/api.md", "# API");
        SiteLoader::new(
            Arc::new(storage),
            LoaderOptions {
                root_segment: Some("docs".to_owned()),
                ..LoaderOptions::default()
            },
        )
    }

    #[test]
    fn initial_snapshot_is_empty_until_reload() {
        let loader = loader_with_docs();
        assert!(loader.get().index.is_empty());

        let snapshot = loader.reload_if_needed();
        assert_eq!(snapshot.index.len(), 2);
    }

    #[test]
    fn reload_is_cached() {
        let loader = loader_with_docs();
        let first = loader.reload_if_needed();
        let second = loader.reload_if_needed();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalidate_forces_reload() {
        let loader = loader_with_docs();
        let first = loader.reload_if_needed();
        loader.invalidate();
        let second = loader.reload_if_needed();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.index.len(), 2);
    }

    #[test]
    fn tree_and_index_come_from_the_same_scan() {
        let loader = loader_with_docs();
        let snapshot = loader.reload_if_needed();

        let mut leaf_slugs = Vec::new();
        collect_leaf_slugs(&snapshot.tree, &mut leaf_slugs);
        leaf_slugs.sort_unstable();

        let mut doc_slugs: Vec<String> = snapshot
            .index
            .documents()
            .iter()
            .map(|d| d.slug.clone())
            .collect();
        doc_slugs.sort_unstable();

        assert_eq!(leaf_slugs, doc_slugs);
    }

    fn collect_leaf_slugs(node: &crate::tree::TreeNode, out: &mut Vec<String>) {
        if let Some(slug) = &node.slug {
            out.push(slug.clone());
        }
        for child in &node.children {
            collect_leaf_slugs(child, out);
        }
    }
}

//! Storage abstraction for the MDX documentation engine.
//!
//! This crate provides a [`Storage`] trait for abstracting document discovery
//! and content retrieval from the underlying backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem, in-memory collections)
//! - **Clean separation** between document-list logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, `exists()` and `mtime()` methods
//! - [`FsStorage`] implementation for filesystem backends
//! - [`MockStorage`] for testing (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdx_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for entry in storage.scan()? {
//!     println!("{}", entry.path.display());
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{ErrorStatus, FileEntry, Storage, StorageError, StorageErrorKind};

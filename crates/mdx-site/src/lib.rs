//! Document list, navigation tree and route resolution.
//!
//! This crate is the pure structure layer of the MDX documentation engine:
//!
//! - [`load_documents`] scans a [`Storage`](mdx_storage::Storage) backend and
//!   produces a title-sorted list of [`Document`] records with derived slugs
//! - [`DocumentIndex`] provides O(1) slug lookups over that list
//! - [`build_tree`] turns the list into a sidebar [`TreeNode`] hierarchy
//! - [`resolve_route`] maps URL paths to slugs under a route prefix
//!
//! No I/O beyond the storage seam, no HTTP. Content itself stays behind the
//! storage and is loaded lazily by consumers.

mod document;
mod index;
mod loader;
mod route;
mod snapshot;
mod tree;

pub use document::{Document, DocumentKind, Frontmatter, parse_frontmatter, strip_frontmatter};
pub use index::DocumentIndex;
pub use loader::{LoaderOptions, load_documents};
pub use route::resolve_route;
pub use snapshot::{SiteLoader, SiteSnapshot};
pub use tree::{TreeNode, build_tree};

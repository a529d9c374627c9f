//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use mdx_playground::PlaygroundResolver;
use mdx_renderer::MarkdownRenderer;
use mdx_site::SiteLoader;
use mdx_storage::Storage;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Storage backend for reading document content.
    pub(crate) storage: Arc<dyn Storage>,
    /// Snapshot loader for the document index and navigation tree.
    pub(crate) loader: SiteLoader,
    /// Markdown renderer for `.md` documents.
    pub(crate) renderer: MarkdownRenderer,
    /// Playground file-graph resolver.
    pub(crate) resolver: PlaygroundResolver,
    /// URL prefix documents are served under.
    pub(crate) route_prefix: String,
    /// Site title.
    pub(crate) title: String,
    /// Site description.
    pub(crate) description: String,
    /// Enable verbose output (show warnings).
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

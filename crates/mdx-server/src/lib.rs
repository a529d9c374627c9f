//! HTTP server for the MDX documentation engine.
//!
//! Serves the document API consumed by the frontend SPA:
//! - `GET /api/config` — site configuration (title, route prefix)
//! - `GET /api/navigation` — navigation tree
//! - `GET /api/docs/{*slug}` — document content with conditional caching
//! - `POST /api/playground/resolve` — playground file-graph resolution
//!
//! Any other URL is treated as a page route: the path is resolved
//! against the configured route prefix and answered with the matching
//! document, so deep links like `/docs/guide/setup` work without the
//! SPA in front.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdx_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         docs_dir: PathBuf::from("docs"),
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use mdx_config::CyclePolicyChoice;
use mdx_playground::{CyclePolicy, DocsFetcher, PlaygroundResolver};
use mdx_renderer::MarkdownRenderer;
use mdx_site::{LoaderOptions, SiteLoader};
use mdx_storage::FsStorage;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub docs_dir: PathBuf,
    /// URL prefix documents are served under.
    pub route_prefix: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Serve documents marked as drafts.
    pub include_drafts: bool,
    /// Playground cycle handling.
    pub cycle_policy: CyclePolicy,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4400,
            docs_dir: PathBuf::from("docs"),
            route_prefix: "docs".to_string(),
            title: "Documentation".to_string(),
            description: String::new(),
            include_drafts: false,
            cycle_policy: CyclePolicy::default(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn mdx_storage::Storage> =
        Arc::new(FsStorage::new(config.docs_dir.clone()));

    let loader = SiteLoader::new(
        Arc::clone(&storage),
        LoaderOptions {
            include_drafts: config.include_drafts,
            ..LoaderOptions::default()
        },
    );

    let resolver = PlaygroundResolver::new(Arc::new(DocsFetcher::new(config.docs_dir.clone())))
        .with_cycle_policy(config.cycle_policy);

    let state = Arc::new(AppState {
        storage,
        loader,
        renderer: MarkdownRenderer::new().with_title_extraction(),
        resolver,
        route_prefix: config.route_prefix.clone(),
        title: config.title.clone(),
        description: config.description.clone(),
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded application config.
#[must_use]
pub fn server_config_from_config(
    config: &mdx_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        docs_dir: config.docs_dir.clone(),
        route_prefix: config.route_prefix(),
        title: config.title.clone(),
        description: config.description.clone(),
        include_drafts: config.include_drafts,
        cycle_policy: match config.cycle_policy {
            CyclePolicyChoice::Resolve => CyclePolicy::Resolve,
            CyclePolicyChoice::Placeholder => CyclePolicy::Placeholder,
        },
        verbose,
        version,
    }
}

//! Content retrieval for playground file references.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use ureq::Agent;

/// Failure to fetch a referenced file.
///
/// Callers treat every variant the same way (placeholder or skip); the
/// variants exist so logs can say what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("file not found: {path}")]
    NotFound { path: String },
    #[error("invalid reference path: {path}")]
    InvalidPath { path: String },
    #[error("HTTP error for {path}: {detail}")]
    Http { path: String, detail: String },
    #[error("I/O error for {path}: {detail}")]
    Io { path: String, detail: String },
}

/// Fetches the content behind a playground file reference.
pub trait FileFetcher: Send + Sync {
    /// Fetch the content for `path`.
    ///
    /// `path` is either relative to the fetcher's root or a full URL,
    /// depending on what the fetcher supports.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Default fetcher: local files under the docs root, with HTTP fallback
/// for full `http(s)` URLs.
pub struct DocsFetcher {
    root: PathBuf,
    agent: Agent,
}

impl DocsFetcher {
    /// Default timeout for HTTP reference fetches.
    pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a fetcher serving files under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Self::HTTP_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            root: root.into(),
            agent,
        }
    }

    /// Resolve a reference path to a location under the root.
    ///
    /// Leading `./` and `/` are stripped, matching how documents write
    /// references. Paths that would escape the root are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let cleaned = path.trim_start_matches("./").trim_start_matches('/');
        let relative = Path::new(cleaned);

        if relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        }) {
            return Err(FetchError::InvalidPath {
                path: path.to_owned(),
            });
        }

        Ok(self.root.join(relative))
    }

    fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Http {
                path: url.to_owned(),
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FetchError::NotFound {
                path: url.to_owned(),
            });
        }
        if status >= 400 {
            return Err(FetchError::Http {
                path: url.to_owned(),
                detail: format!("HTTP {status}"),
            });
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Io {
                path: url.to_owned(),
                detail: e.to_string(),
            })
    }
}

impl FileFetcher for DocsFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return self.fetch_url(path);
        }

        let full_path = self.resolve(path)?;
        match std::fs::read_to_string(&full_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound {
                path: path.to_owned(),
            }),
            Err(e) => Err(FetchError::Io {
                path: path.to_owned(),
                detail: e.to_string(),
            }),
        }
    }
}

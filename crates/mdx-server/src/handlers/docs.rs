//! Document API endpoint.
//!
//! Resolves slugs (and page URLs via the fallback route) to documents
//! and returns their content as JSON. Markdown is rendered to HTML
//! server-side; MDX is served as raw source for the frontend MDX
//! runtime to evaluate.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use mdx_site::{DocumentKind, resolve_route, strip_frontmatter};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/docs/{slug}.
#[derive(Serialize)]
struct DocumentResponse {
    /// Document metadata.
    meta: DocumentMeta,
    /// Rendered HTML for markdown documents, raw source for MDX.
    content: String,
}

/// Document metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMeta {
    /// Display title.
    title: String,
    /// Document slug.
    slug: String,
    /// URL path under the route prefix.
    path: String,
    /// Source file path relative to the docs root.
    source_file: String,
    /// Source format; tells the frontend how to treat `content`.
    kind: DocumentKind,
    /// Last modification time (ISO 8601).
    last_modified: String,
}

/// Handle GET /api/docs/ (empty slug).
///
/// The root index document derives an empty slug and is never listed,
/// so the root of the docs API is always a not-found.
pub(crate) async fn get_root_document() -> ServerError {
    ServerError::DocumentNotFound(String::new())
}

/// Handle GET /api/docs/{*slug}.
pub(crate) async fn get_document(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    get_document_impl(slug, &state, &headers)
}

/// Fallback handler: treat the URL as a page route.
///
/// Strips the configured route prefix from the request path to obtain
/// the slug, so `/docs/guide/setup` answers with the `guide/setup`
/// document.
pub(crate) async fn get_routed_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let slug = resolve_route(uri.path(), &state.route_prefix)
        .ok_or_else(|| ServerError::DocumentNotFound(uri.path().to_owned()))?;
    get_document_impl(slug, &state, &headers)
}

/// Shared implementation for document responses.
fn get_document_impl(
    slug: String,
    state: &AppState,
    headers: &HeaderMap,
) -> Result<axum::response::Response, ServerError> {
    let snapshot = state.loader.reload_if_needed();
    let document = snapshot
        .index
        .get(&slug)
        .ok_or_else(|| ServerError::DocumentNotFound(slug.clone()))?;

    if state.verbose {
        tracing::info!(slug = %slug, path = %document.path.display(), "Serving document");
    }

    let source_path = document.path.to_string_lossy();
    let raw = state.storage.read(&source_path)?;

    let (content, title) = match document.kind {
        DocumentKind::Md => {
            let rendered = state.renderer.render(strip_frontmatter(&raw));
            let title = rendered.title.unwrap_or_else(|| document.title.clone());
            (rendered.html, title)
        }
        // MDX is compiled client-side; the API hands over the source
        DocumentKind::Mdx => (raw, document.title.clone()),
    };

    let etag = compute_etag(&state.version, &content);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    // Last-Modified is best-effort; a backend without mtimes reports the epoch
    let mtime = state.storage.mtime(&source_path).unwrap_or(0.0);
    let source_mtime = UNIX_EPOCH + Duration::from_secs_f64(mtime.max(0.0));
    let last_modified: DateTime<Utc> = source_mtime.into();

    let response = DocumentResponse {
        meta: DocumentMeta {
            title,
            slug: document.slug.clone(),
            path: to_url_path(&state.route_prefix, &document.slug),
            source_file: source_path.into_owned(),
            kind: document.kind,
            last_modified: last_modified.to_rfc3339(),
        },
        content,
    };

    Ok((
        [
            (header::ETAG, etag),
            (
                header::LAST_MODIFIED,
                last_modified
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ),
            (header::CACHE_CONTROL, "private, max-age=60".to_string()),
        ],
        Json(response),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_content() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes = 18 total
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_document_meta_serialization() {
        let meta = DocumentMeta {
            title: "Setup".to_owned(),
            slug: "guide/setup".to_owned(),
            path: "/docs/guide/setup".to_owned(),
            source_file: "guide/setup.md".to_owned(),
            kind: DocumentKind::Md,
            last_modified: "2025-01-01T00:00:00Z".to_owned(),
        };

        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["title"], "Setup");
        assert_eq!(json["slug"], "guide/setup");
        assert_eq!(json["path"], "/docs/guide/setup");
        assert_eq!(json["sourceFile"], "guide/setup.md");
        assert_eq!(json["kind"], "md");
        assert_eq!(json["lastModified"], "2025-01-01T00:00:00Z");
    }
}

//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mdx_storage::StorageError;
use serde_json::json;

/// Server error type.
///
/// Not-found is deliberately separate from load failures: a missing
/// document is an expected navigation outcome, a failed read of a
/// known document is not.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No document matches the requested slug or path.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// A known document's content could not be read.
    #[error("Error loading document: {0}")]
    Load(#[from] StorageError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::DocumentNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Document not found", "path": path}),
            ),
            Self::Load(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Error Loading Document", "detail": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

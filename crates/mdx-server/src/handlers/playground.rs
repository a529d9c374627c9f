//! Playground API endpoint.
//!
//! Resolves a playground file manifest server-side so the frontend can
//! hand a complete file set to the sandbox component.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use mdx_playground::{PlaygroundEntry, ResolvedPlayground};
use serde::Deserialize;

use crate::state::AppState;

/// Request body for POST /api/playground/resolve.
#[derive(Deserialize)]
pub(crate) struct ResolveRequest {
    /// Files in document order.
    files: Vec<PlaygroundEntry>,
}

/// Handle POST /api/playground/resolve.
///
/// Resolution is best-effort and never fails: missing references come
/// back as placeholder comments.
pub(crate) async fn resolve_playground(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResolveRequest>,
) -> Json<ResolvedPlayground> {
    Json(state.resolver.resolve(&request.files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdx_playground::FileSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_request_deserialization() {
        let request: ResolveRequest = serde_json::from_str(
            r#"{
                "files": [
                    {"name": "/App.tsx", "source": {"literal": "let x = 1;"}},
                    {"name": "/util.ts", "source": {"reference": "demo/util.ts"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.files.len(), 2);
        assert_eq!(
            request.files[0].source,
            FileSource::Literal("let x = 1;".to_owned())
        );
        assert_eq!(
            request.files[1].source,
            FileSource::Reference("demo/util.ts".to_owned())
        );
    }
}

//! Navigation API endpoint.
//!
//! Returns the navigation tree for the documentation site.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use mdx_site::TreeNode;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Root of the navigation tree.
    tree: TreeNode,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let snapshot = state.loader.reload_if_needed();
    Json(NavigationResponse {
        tree: snapshot.tree.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdx_site::{Document, DocumentKind, build_tree};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_navigation_response_serialization() {
        let documents = vec![Document {
            slug: "guide/intro".to_owned(),
            title: "Intro".to_owned(),
            path: "guide/intro.md".into(),
            kind: DocumentKind::Md,
            draft: false,
        }];
        let response = NavigationResponse {
            tree: build_tree(&documents),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["tree"]["name"], "root");
        assert_eq!(json["tree"]["children"][0]["name"], "guide");
        assert_eq!(
            json["tree"]["children"][0]["children"][0]["slug"],
            "guide/intro"
        );
    }
}

//! Configuration API endpoint.
//!
//! Returns client-side configuration for the frontend.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/config.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigResponse {
    /// Site title shown in the navigation header.
    title: String,
    /// Site description.
    description: String,
    /// URL prefix documents are served under.
    route_prefix: String,
}

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        title: state.title.clone(),
        description: state.description.clone(),
        route_prefix: state.route_prefix.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_response_serialization() {
        let response = ConfigResponse {
            title: "Documentation".to_owned(),
            description: "Project docs".to_owned(),
            route_prefix: "docs".to_owned(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["title"], "Documentation");
        assert_eq!(json["description"], "Project docs");
        assert_eq!(json["routePrefix"], "docs");
    }
}

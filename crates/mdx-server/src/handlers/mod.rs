//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod docs;
pub(crate) mod navigation;
pub(crate) mod playground;

/// Convert an internal slug (no leading slash) to a URL path.
///
/// Slugs are stored without leading slashes ("guide", "guide/setup"),
/// but the frontend expects URL paths with them.
pub(crate) fn to_url_path(route_prefix: &str, slug: &str) -> String {
    format!("/{route_prefix}/{slug}")
}

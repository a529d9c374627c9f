//! URL route resolution.

/// Resolve a URL path to a document slug under a route prefix.
///
/// The prefix match uses the *last* occurrence of the prefix segment so a
/// path that happens to repeat the prefix (e.g., `/docs/docs/guide` when a
/// document directory shares the prefix name) resolves against the innermost
/// one. The slug is everything after the prefix; an empty slug is "not
/// found", represented as `None`.
///
/// # Examples
///
/// ```
/// use mdx_site::resolve_route;
///
/// assert_eq!(resolve_route("/docs/a/b", "docs"), Some("a/b".to_owned()));
/// assert_eq!(resolve_route("/docs/", "docs"), None);
/// ```
#[must_use]
pub fn resolve_route(path: &str, prefix: &str) -> Option<String> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let prefix_pos = parts.iter().rposition(|p| p == &prefix)?;

    let slug_parts = &parts[prefix_pos + 1..];
    if slug_parts.is_empty() {
        return None;
    }
    Some(slug_parts.join("/"))
}

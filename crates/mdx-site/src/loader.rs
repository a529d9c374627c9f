//! Document discovery.
//!
//! Turns the flat file listing of a [`Storage`] backend into an ordered
//! [`Document`] list: extension filtering, root-segment scoping, slug
//! derivation, frontmatter titles and draft exclusion.
//!
//! Failure policy: a malformed or unreadable entry is skipped with a warning,
//! never fatal. A failed scan yields an empty list.

use std::collections::HashSet;

use mdx_storage::Storage;

use crate::document::{Document, DocumentKind, parse_frontmatter};

/// Options controlling document discovery.
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    /// Root directory segment. When set, paths are scoped to everything after
    /// the first occurrence of this segment and paths without it are rejected.
    /// When `None`, scan paths are taken as already relative to the docs root.
    pub root_segment: Option<String>,
    /// Path segments that disqualify an entry (nested-app markers). This is a
    /// loop-prevention heuristic: a docs tree containing a generated viewer
    /// app must not surface the app's own sources as documents.
    pub skip_markers: Vec<String>,
    /// Include documents whose frontmatter marks them as drafts.
    pub include_drafts: bool,
    /// Generated allow-list of valid interactive (MDX) source paths. When
    /// present, MDX entries not on the list are excluded.
    pub allowed_mdx: Option<HashSet<String>>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            root_segment: None,
            skip_markers: vec!["node_modules".to_owned(), "docs-app".to_owned()],
            include_drafts: false,
            allowed_mdx: None,
        }
    }
}

/// Scan the storage and build the document list.
///
/// The result is sorted by title, case-insensitive lexicographic, and stable
/// across repeated calls on the same input. Slugs are unique within the list;
/// a later entry deriving an already-taken slug is skipped.
///
/// This function never fails: scan errors produce an empty list and entry
/// level problems skip just that entry.
#[must_use]
pub fn load_documents(storage: &dyn Storage, options: &LoaderOptions) -> Vec<Document> {
    let entries = match storage.scan() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to scan storage");
            return Vec::new();
        }
    };

    let mut documents = Vec::new();
    let mut seen_slugs: HashSet<String> = HashSet::new();

    for entry in &entries {
        let path_str = entry.path.to_string_lossy().replace('\\', "/");
        let Some(doc) = build_document(storage, &path_str, options) else {
            continue;
        };

        if !seen_slugs.insert(doc.slug.clone()) {
            tracing::warn!(path = %path_str, slug = %doc.slug, "Duplicate slug, entry skipped");
            continue;
        }
        documents.push(doc);
    }

    // Case-insensitive title sort; sort_by is stable so equal titles keep
    // their scan order
    documents.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    documents
}

/// Build a single document from a scan path, or `None` to skip it.
fn build_document(storage: &dyn Storage, path: &str, options: &LoaderOptions) -> Option<Document> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // Scope to the configured root segment when one is set
    let slug_segments: &[&str] = match &options.root_segment {
        Some(root) => {
            let pos = segments.iter().position(|s| s == root)?;
            &segments[pos + 1..]
        }
        None => &segments,
    };

    if slug_segments.is_empty()
        || slug_segments
            .iter()
            .any(|s| options.skip_markers.iter().any(|m| m == s))
    {
        return None;
    }

    let file_name = slug_segments.last()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    let kind = DocumentKind::from_extension(ext)?;

    if kind == DocumentKind::Mdx
        && let Some(allowed) = &options.allowed_mdx
        && !allowed.contains(path)
    {
        return None;
    }

    let slug = derive_slug(slug_segments, stem)?;

    let content = match storage.read(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Unreadable entry skipped");
            return None;
        }
    };

    let frontmatter = parse_frontmatter(&content).unwrap_or_default();
    let draft = frontmatter.draft.unwrap_or(false);
    if draft && !options.include_drafts {
        return None;
    }

    let title = frontmatter.title.unwrap_or_else(|| {
        if stem == "index" {
            // Directory index: title from the slug's last segment
            slug.rsplit('/').next().unwrap_or(&slug).replace('-', " ")
        } else {
            // Full file name, extension included
            (*file_name).to_owned()
        }
    });

    Some(Document {
        slug,
        title,
        path: path.into(),
        kind,
        draft,
    })
}

/// Derive a slug from path segments: extension stripped, trailing `index`
/// removed, segments joined by `/`. Returns `None` for an empty slug (the
/// root index document is not independently addressable).
fn derive_slug(segments: &[&str], stem: &str) -> Option<String> {
    let mut parts: Vec<&str> = segments[..segments.len() - 1].to_vec();
    if stem != "index" {
        parts.push(stem);
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use mdx_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn slugs(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.slug.as_str()).collect()
    }

    #[test]
    fn test_slug_derivation() {
        let storage = MockStorage::new()
            .with_file("guide.md", "# G")
            .with_file("guide/setup.mdx", "# S")
            .with_file("guide/advanced/index.md", "# A");

        let docs = load_documents(&storage, &LoaderOptions::default());

        let mut found = slugs(&docs);
        found.sort_unstable();
        assert_eq!(found, vec!["guide", "guide/advanced", "guide/setup"]);
    }

    #[test]
    fn test_root_index_is_skipped() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("guide.md", "# G");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(slugs(&docs), vec!["guide"]);
    }

    #[test]
    fn test_unrecognized_extensions_are_skipped() {
        let storage = MockStorage::new()
            .with_file("guide.md", "# G")
            .with_file("notes.txt", "text")
            .with_file("data.json", "{}");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(slugs(&docs), vec!["guide"]);
    }

    #[test]
    fn test_root_segment_scoping() {
        let storage = MockStorage::new()
            .with_file("project/docs/guide.md", "# G")
            .with_file("project/readme.md", "# Outside");
        let options = LoaderOptions {
            root_segment: Some("docs".to_owned()),
            ..Default::default()
        };

        let docs = load_documents(&storage, &options);

        assert_eq!(slugs(&docs), vec!["guide"]);
        assert_eq!(docs[0].path.to_string_lossy(), "project/docs/guide.md");
    }

    #[test]
    fn test_skip_markers_reject_nested_app_paths() {
        let storage = MockStorage::new()
            .with_file("guide.md", "# G")
            .with_file("node_modules/pkg/readme.md", "# Pkg")
            .with_file("docs-app/src/page.md", "# App");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(slugs(&docs), vec!["guide"]);
    }

    #[test]
    fn test_title_from_frontmatter() {
        let storage =
            MockStorage::new().with_file("guide.md", "---\ntitle: The Guide\n---\n# Heading");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(docs[0].title, "The Guide");
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        let storage = MockStorage::new().with_file("setup-guide.md", "No metadata.");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(docs[0].title, "setup-guide.md");
    }

    #[test]
    fn test_index_title_from_slug_segment() {
        let storage = MockStorage::new().with_file("getting-started/index.md", "No metadata.");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(docs[0].slug, "getting-started");
        assert_eq!(docs[0].title, "getting started");
    }

    #[test]
    fn test_sorted_by_title_case_insensitive() {
        let storage = MockStorage::new()
            .with_file("b.md", "---\ntitle: banana\n---\n")
            .with_file("a.md", "---\ntitle: Cherry\n---\n")
            .with_file("c.md", "---\ntitle: Apple\n---\n");

        let docs = load_documents(&storage, &LoaderOptions::default());

        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_stable_across_repeated_calls() {
        let storage = MockStorage::new()
            .with_file("x.md", "---\ntitle: Same\n---\n")
            .with_file("y.md", "---\ntitle: same\n---\n");

        let first = load_documents(&storage, &LoaderOptions::default());
        let second = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_drafts_excluded_by_default() {
        let storage = MockStorage::new()
            .with_file("wip.md", "---\ndraft: true\n---\n# WIP")
            .with_file("done.md", "# Done");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(slugs(&docs), vec!["done"]);
    }

    #[test]
    fn test_drafts_included_when_requested() {
        let storage = MockStorage::new().with_file("wip.md", "---\ndraft: true\n---\n# WIP");
        let options = LoaderOptions {
            include_drafts: true,
            ..Default::default()
        };

        let docs = load_documents(&storage, &options);

        assert_eq!(slugs(&docs), vec!["wip"]);
        assert!(docs[0].draft);
    }

    #[test]
    fn test_mdx_allow_list() {
        let storage = MockStorage::new()
            .with_file("valid.mdx", "# Valid")
            .with_file("broken.mdx", "# Broken")
            .with_file("plain.md", "# Plain");
        let options = LoaderOptions {
            allowed_mdx: Some(std::iter::once("valid.mdx".to_owned()).collect()),
            ..Default::default()
        };

        let docs = load_documents(&storage, &options);

        let mut found = slugs(&docs);
        found.sort_unstable();
        // Plain markdown is unaffected by the MDX allow-list
        assert_eq!(found, vec!["plain", "valid"]);
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let storage = MockStorage::new()
            .with_file("guide.md", "# A")
            .with_file("guide/index.md", "# B");

        let docs = load_documents(&storage, &LoaderOptions::default());

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path.to_string_lossy(), "guide.md");
    }

    #[test]
    fn test_failed_scan_returns_empty_list() {
        let storage = MockStorage::new().with_failing_scan();

        assert!(load_documents(&storage, &LoaderOptions::default()).is_empty());
    }

    #[test]
    fn test_kind_recorded_per_document() {
        let storage = MockStorage::new()
            .with_file("plain.md", "# P")
            .with_file("rich.mdx", "# R");

        let docs = load_documents(&storage, &LoaderOptions::default());

        let plain = docs.iter().find(|d| d.slug == "plain").unwrap();
        let rich = docs.iter().find(|d| d.slug == "rich").unwrap();
        assert_eq!(plain.kind, DocumentKind::Md);
        assert_eq!(rich.kind, DocumentKind::Mdx);
    }
}

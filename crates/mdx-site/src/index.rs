//! Slug-indexed document list.

use std::collections::HashMap;

use crate::document::Document;

/// Document list with O(1) slug lookups.
///
/// Wraps the title-sorted output of
/// [`load_documents`](crate::load_documents); iteration order is the sorted
/// list order.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    documents: Vec<Document>,
    by_slug: HashMap<String, usize>,
}

impl DocumentIndex {
    /// Build an index over a document list.
    ///
    /// The list is expected to have unique slugs (the loader guarantees it);
    /// if a duplicate does appear, the first occurrence wins.
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        let mut by_slug = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            by_slug.entry(doc.slug.clone()).or_insert(i);
        }
        Self { documents, by_slug }
    }

    /// Look up a document by slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Document> {
        self.by_slug.get(slug).map(|&i| &self.documents[i])
    }

    /// All documents in title order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// First document in title order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Document> {
        self.documents.first()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no documents were discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::DocumentKind;

    fn doc(slug: &str, title: &str) -> Document {
        Document {
            slug: slug.to_owned(),
            title: title.to_owned(),
            path: PathBuf::from(format!("{slug}.md")),
            kind: DocumentKind::Md,
            draft: false,
        }
    }

    #[test]
    fn test_get_by_slug() {
        let index = DocumentIndex::new(vec![doc("api", "API"), doc("guide/intro", "Intro")]);

        assert_eq!(index.get("guide/intro").unwrap().title, "Intro");
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_preserves_order() {
        let index = DocumentIndex::new(vec![doc("api", "API"), doc("guide", "Guide")]);

        assert_eq!(index.first().unwrap().slug, "api");
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = DocumentIndex::default();

        assert!(index.is_empty());
        assert!(index.first().is_none());
    }
}

//! Navigation tree construction.
//!
//! Builds the collapsible-sidebar hierarchy from the document list: slug
//! segments become nested nodes, documents become leaves. Internal nodes are
//! structural and carry no slug, unless a directory index document gives the
//! directory itself a page.

use serde::Serialize;

use crate::document::Document;

/// A node in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Raw segment name (directory or file stem).
    pub name: String,
    /// Document slug; present on leaves and on directories with an index
    /// document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Child nodes; empty for leaves.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            title: None,
            children: Vec::new(),
        }
    }

    /// Display name: title when present, raw name otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Build the navigation tree from a document list.
///
/// Walks each slug's `/`-separated segments, creating nodes along the path.
/// The final segment becomes a leaf carrying the slug and title; internal
/// segments get a derived title (hyphens replaced by spaces). Siblings are
/// sorted directories-first, then alphabetically by display name,
/// case-insensitive. Building twice from the same list yields structurally
/// identical trees.
#[must_use]
pub fn build_tree(documents: &[Document]) -> TreeNode {
    let mut root = TreeNode::new("root");

    for doc in documents {
        let parts: Vec<&str> = doc.slug.split('/').filter(|s| !s.is_empty()).collect();
        let mut current = &mut root;

        for (i, part) in parts.iter().enumerate() {
            let is_leaf = i == parts.len() - 1;

            let pos = current.children.iter().position(|c| c.name == *part);
            let idx = match pos {
                Some(idx) => idx,
                None => {
                    let mut node = TreeNode::new(*part);
                    if !is_leaf {
                        node.title = Some(part.replace('-', " "));
                    }
                    current.children.push(node);
                    current.children.len() - 1
                }
            };
            current = &mut current.children[idx];
            if is_leaf {
                // A directory index document lands on a node that already has
                // children; it keeps them and becomes navigable.
                current.slug = Some(doc.slug.clone());
                current.title = Some(doc.title.clone());
            }
        }
    }

    sort_siblings(&mut root);
    root
}

/// Sort children recursively: directories first, then case-insensitive by
/// display name.
fn sort_siblings(node: &mut TreeNode) {
    node.children.sort_by(|a, b| {
        let a_dir = !a.children.is_empty();
        let b_dir = !b.children.is_empty();
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()))
    });
    for child in &mut node.children {
        sort_siblings(child);
    }
}

//! Document records and frontmatter parsing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source format of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Plain Markdown, rendered to HTML server-side.
    Md,
    /// MDX, compiled by the external MDX pipeline; served as raw source.
    Mdx,
}

impl DocumentKind {
    /// Detect the kind from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" => Some(Self::Md),
            "mdx" => Some(Self::Mdx),
            _ => None,
        }
    }
}

/// A discovered document.
///
/// Created at scan time and immutable thereafter. Content is not held here;
/// it is read lazily through the storage when the document is rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    /// URL-safe identifier, unique within the list (e.g., "guide/setup").
    pub slug: String,
    /// Display title (frontmatter override > file name > slug segment).
    pub title: String,
    /// Source path relative to the docs root (e.g., "guide/setup.md").
    pub path: PathBuf,
    /// Source format.
    pub kind: DocumentKind,
    /// True if the frontmatter marks this document as a draft.
    pub draft: bool,
}

/// Optional metadata block at the top of a document file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Display title override.
    pub title: Option<String>,
    /// Draft flag; drafts are excluded from the document list by default.
    pub draft: Option<bool>,
}

/// Parse a YAML frontmatter block delimited by `---` lines.
///
/// Returns `None` when the document has no frontmatter or the block fails to
/// parse. A malformed block is a skip, never an error: the document is still
/// usable, just without metadata.
#[must_use]
pub fn parse_frontmatter(content: &str) -> Option<Frontmatter> {
    let rest = content.strip_prefix("---")?;
    // The opening fence must be a full line
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let block = &rest[..offset];
            if block.trim().is_empty() {
                return Some(Frontmatter::default());
            }
            return match serde_yaml::from_str::<Frontmatter>(block) {
                Ok(fm) => Some(fm),
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed frontmatter block");
                    None
                }
            };
        }
        offset += line.len();
    }
    None
}

/// Return the document body with any frontmatter block removed.
///
/// Content without a well-formed frontmatter block is returned
/// unchanged, including content whose block never closes.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("---") else {
        return content;
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return content;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return &rest[offset + line.len()..];
        }
        offset += line.len();
    }
    content
}

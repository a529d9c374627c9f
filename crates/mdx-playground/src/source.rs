//! Playground input types.

use serde::{Deserialize, Serialize};

/// Content backing a single playground file.
///
/// Earlier iterations guessed whether a string was a file path or
/// inline code from its shape. The tag makes the caller's intent
/// explicit instead.
///
/// Serializes externally tagged with lowercase variant names:
/// `{"literal": "..."}` or `{"reference": "demo/app.tsx"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSource {
    /// Inline code supplied directly by the document.
    Literal(String),
    /// A path to fetch the content from, relative to the docs root,
    /// or a full `http(s)` URL.
    Reference(String),
}

/// One named file in a playground block, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundEntry {
    /// Virtual filename in the sandbox file system, e.g. `/App.tsx`.
    pub name: String,
    /// Where the content comes from.
    pub source: FileSource,
}

impl PlaygroundEntry {
    #[must_use]
    pub fn literal(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Literal(code.into()),
        }
    }

    #[must_use]
    pub fn reference(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Reference(path.into()),
        }
    }
}

//! Best-effort resolution of a playground's file graph.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::fetcher::FileFetcher;
use crate::source::{FileSource, PlaygroundEntry};

/// Matches the module specifier of an import statement. Single-pass
/// heuristic, not a parser; good enough for the demo files playgrounds
/// reference.
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s+[^'"\n]+['"](.+?)['"]"#).unwrap());

/// Extensions the interactive sandbox can execute or display natively.
const SUPPORTED_EXTENSIONS: [&str; 7] = ["js", "ts", "tsx", "jsx", "html", "css", "json"];

/// Content for a reference that could not be fetched.
fn missing_file_placeholder(path: &str) -> String {
    format!("// File not found or could not be loaded: {path}")
}

/// How files that import each other in a cycle are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Cycle members keep their fetched content.
    #[default]
    Resolve,
    /// Files imported from within their own cycle are emptied, making
    /// the cycle visible in the resolved output.
    Placeholder,
}

/// How the frontend should present the resolved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaygroundMode {
    /// Hand the files to the interactive sandbox.
    Interactive,
    /// No file is executable; show the first file as preformatted text.
    RawPreview,
}

/// A fully resolved sandbox file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaygroundFile {
    pub name: String,
    pub content: String,
}

/// Output of [`PlaygroundResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlayground {
    /// Resolved files in first-seen order: entries in input order, each
    /// followed by the dependencies discovered through it.
    pub files: Vec<PlaygroundFile>,
    pub mode: PlaygroundMode,
}

/// Resolves playground entries into a complete sandbox file set.
///
/// Entries are fetched in parallel through the rayon thread pool and
/// merged in input order afterwards, first occurrence of a filename
/// winning.
pub struct PlaygroundResolver {
    fetcher: Arc<dyn FileFetcher>,
    cycle_policy: CyclePolicy,
}

impl PlaygroundResolver {
    #[must_use]
    pub fn new(fetcher: Arc<dyn FileFetcher>) -> Self {
        Self {
            fetcher,
            cycle_policy: CyclePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Resolve all entries. Never fails: unfetchable top-level
    /// references become placeholder comments and unfetchable
    /// dependencies are skipped.
    #[must_use]
    pub fn resolve(&self, entries: &[PlaygroundEntry]) -> ResolvedPlayground {
        let per_entry: Vec<Vec<PlaygroundFile>> = entries
            .par_iter()
            .map(|entry| self.resolve_entry(entry))
            .collect();

        let mut files = Vec::new();
        let mut seen = HashSet::new();
        for batch in per_entry {
            for file in batch {
                if seen.insert(file.name.clone()) {
                    files.push(file);
                }
            }
        }

        let mode = classify(&files);
        ResolvedPlayground { files, mode }
    }

    fn resolve_entry(&self, entry: &PlaygroundEntry) -> Vec<PlaygroundFile> {
        match &entry.source {
            FileSource::Literal(code) => vec![PlaygroundFile {
                name: entry.name.clone(),
                content: code.clone(),
            }],
            FileSource::Reference(path) => {
                let content = match self.fetcher.fetch(path) {
                    Ok(content) => content,
                    Err(error) => {
                        debug!(path = %path, %error, "playground reference not loadable");
                        missing_file_placeholder(path)
                    }
                };

                let mut walk = Walk::default();
                walk.loaded.insert(entry.name.clone());
                self.load(entry.name.clone(), content, &mut walk);

                if self.cycle_policy == CyclePolicy::Placeholder {
                    for file in &mut walk.files {
                        if walk.cycle_members.contains(&file.name) {
                            file.content.clear();
                        }
                    }
                }

                walk.files
            }
        }
    }

    /// Record `content` for `name` and pull in its relative imports.
    ///
    /// The caller must have marked `name` as loaded already; marking
    /// happens before any fetch, which is what guarantees termination
    /// on cyclic imports.
    fn load(&self, name: String, content: String, walk: &mut Walk) {
        let deps = scan_imports(&content);
        walk.in_progress.insert(name.clone());
        walk.files.push(PlaygroundFile {
            name: name.clone(),
            content,
        });

        for (dep_name, dep_path) in deps {
            if walk.loaded.contains(&dep_name) {
                if walk.in_progress.contains(&dep_name) {
                    walk.cycle_members.insert(dep_name);
                }
                continue;
            }
            walk.loaded.insert(dep_name.clone());

            match self.fetcher.fetch(&dep_path) {
                Ok(dep_content) => self.load(dep_name, dep_content, walk),
                Err(error) => {
                    debug!(path = %dep_path, %error, "playground dependency not loadable, skipping");
                }
            }
        }

        walk.in_progress.remove(&name);
    }
}

#[derive(Default)]
struct Walk {
    files: Vec<PlaygroundFile>,
    loaded: HashSet<String>,
    in_progress: HashSet<String>,
    cycle_members: HashSet<String>,
}

/// Extract relative imports as `(sandbox filename, fetch path)` pairs.
///
/// Only `./` and `../` specifiers are candidates; bare package imports
/// are the sandbox runtime's problem. A leading `./` maps to the
/// sandbox root, so `./utils.ts` becomes the virtual file `/utils.ts`.
fn scan_imports(content: &str) -> Vec<(String, String)> {
    IMPORT_RE
        .captures_iter(content)
        .filter_map(|captures| {
            let dep_path = captures.get(1)?.as_str();
            if !dep_path.starts_with("./") && !dep_path.starts_with("../") {
                return None;
            }
            let dep_name = if let Some(rest) = dep_path.strip_prefix("./") {
                format!("/{rest}")
            } else {
                dep_path.to_owned()
            };
            Some((dep_name, dep_path.to_owned()))
        })
        .collect()
}

/// A playground whose files are all non-executable falls back to a raw
/// preformatted display.
fn classify(files: &[PlaygroundFile]) -> PlaygroundMode {
    let all_unsupported = files.iter().all(|file| {
        extension(&file.name)
            .is_some_and(|ext| !SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    });
    if all_unsupported {
        PlaygroundMode::RawPreview
    } else {
        PlaygroundMode::Interactive
    }
}

fn extension(name: &str) -> Option<&str> {
    let base = name.rsplit('/').next()?;
    base.rsplit_once('.').map(|(_, ext)| ext)
}

//! Code playground file-graph resolution.
//!
//! A playground block in a document names a set of virtual files, each
//! backed either by literal code or by a reference to a file on disk or
//! over HTTP. Before the frontend sandbox can render the block, every
//! reference has to be fetched and its relative imports pulled in as
//! additional files. This crate does that resolution server-side:
//!
//! - [`FileSource`] tags each entry as `Literal` or `Reference`, so the
//!   resolver never has to guess whether a string is code or a path.
//! - [`FileFetcher`] abstracts content retrieval; [`DocsFetcher`] reads
//!   from a local directory and falls back to HTTP for full URLs.
//! - [`PlaygroundResolver`] walks the import graph with a visited set
//!   updated before each fetch, so cyclic imports always terminate.
//!
//! Resolution is best-effort throughout. A top-level reference that
//! cannot be fetched becomes a placeholder comment, a missing
//! dependency is skipped, and the resolver itself never fails.

mod fetcher;
mod resolver;
mod source;

pub use fetcher::{DocsFetcher, FetchError, FileFetcher};
pub use resolver::{
    CyclePolicy, PlaygroundFile, PlaygroundMode, PlaygroundResolver, ResolvedPlayground,
};
pub use source::{FileSource, PlaygroundEntry};

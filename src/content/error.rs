//! Content engine error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a parse cycle.
///
/// `Read` and `Decode` abort the whole cycle; a dangling `extends`
/// reference is deliberately not represented here because it is a
/// non-fatal, per-page outcome (the page renders unresolved).
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content root `{0}` is missing")]
    MissingContentRoot(PathBuf),

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode `{path}`: {reason}")]
    Decode { path: PathBuf, reason: String },

    // NOTE: No #[from] here - a reload wraps its cause explicitly at the
    // publish boundary, never implicitly mid-cycle
    #[error("reload aborted: {0}")]
    ReloadAborted(#[source] Box<ContentError>),
}

impl ContentError {
    /// Wrap a cycle failure at the reload boundary.
    pub fn aborted(cause: ContentError) -> Self {
        Self::ReloadAborted(Box::new(cause))
    }
}

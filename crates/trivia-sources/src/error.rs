//! Question source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when fetching questions from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The question set file does not exist.
    #[error("question set not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The question set parsed but cannot be played.
    #[error("invalid question set {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    /// The source produced no questions.
    #[error("question source '{0}' has no questions")]
    Empty(String),
}

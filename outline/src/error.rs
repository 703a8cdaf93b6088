//! Error types for outline parsing and the hierarchy codec.

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::display_path;

/// Result type alias for outline operations.
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur while reading, parsing or encoding an outline.
#[derive(Error, Debug)]
pub enum OutlineError {
    /// A required boundary marker is absent from the source text.
    #[error("outline boundary not found: {marker:?}")]
    BoundaryNotFound { marker: String },

    /// A document node matches none of the accepted shapes.
    #[error("unsupported node shape at {path}: {reason}")]
    UnsupportedNodeShape { path: String, reason: String },

    /// YAML encoding or decoding failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading or writing a document failed.
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutlineError {
    pub(crate) fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedNodeShape {
            path: display_path(path),
            reason: reason.into(),
        }
    }
}

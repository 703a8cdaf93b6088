//! Error types for the directory materializer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for materializer operations.
pub type Result<T> = std::result::Result<T, MaterializeError>;

/// Errors that can occur while materializing a tree.
#[derive(Error, Debug)]
pub enum MaterializeError {
    /// The tree root has no entries to turn into directories.
    #[error("invalid root: expected a mapping or a list of single-key mappings, got {0}")]
    InvalidRoot(String),

    /// Creating a directory failed. Directories created before the failure
    /// are left in place.
    #[error("failed to create directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

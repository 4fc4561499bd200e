//! Error types for skel-git

use std::path::PathBuf;

/// Result type for skel-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skel-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository has no working tree")]
    BareRepository,

    #[error("Path {path} lies outside the repository working tree")]
    OutsideWorkTree { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! Error types for skel-core

/// Result type for skel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skel-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A ledger line that is neither a comment, a version header nor a
    /// fingerprint entry. The ledger cannot be partially trusted, so
    /// loading stops at the first bad line.
    #[error("Corrupt ledger at line {line}: {text:?}")]
    LedgerCorrupt { line: usize, text: String },

    /// The ledger was written by a newer tool than the one running.
    #[error(
        "This project requires skelgen {recorded} or newer, but this is skelgen {running}. \
         Upgrade skelgen, or edit the version line in .skelgen to force regeneration."
    )]
    VersionIncompatible {
        recorded: semver::Version,
        running: semver::Version,
    },

    /// Lookup of a path the ledger does not track
    #[error("Not tracked in ledger: {0}")]
    NotFound(String),

    /// Filesystem error from skel-fs
    #[error(transparent)]
    Fs(#[from] skel_fs::Error),

    /// Git error from skel-git
    #[error(transparent)]
    Git(#[from] skel_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status a CLI front end should use for this error.
    ///
    /// Corrupt-ledger and version-gate failures are configuration
    /// problems the operator must resolve by hand; they exit with 2.
    /// Everything else is an ordinary failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LedgerCorrupt { .. } | Self::VersionIncompatible { .. } => 2,
            _ => 1,
        }
    }
}

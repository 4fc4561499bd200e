//! Constants and enums for project filesystem paths.

use std::path::Path;

/// File extension that triggers carriage-return normalization before
/// fingerprinting. Shell scripts are the files whose line endings vary
/// across platforms while their execute bit matters.
pub const SHELL_EXTENSION: &str = "sh";

/// Standard project filesystem paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `.skelgen` ledger file (one fingerprint per generated file)
    LedgerFile,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerFile => ".skelgen",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

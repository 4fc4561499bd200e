//! Version gate
//!
//! A ledger written by a newer skelgen may describe a project layout an
//! older binary cannot regenerate safely. The gate refuses the
//! transaction before any caller logic runs.

use semver::Version;

use crate::{Error, Result};

/// Check that the running tool is new enough for this ledger.
///
/// The running version is an explicit parameter rather than a process
/// global, so the gate can be exercised with arbitrary version pairs.
/// Comparison is semantic, field by field, per semver precedence.
///
/// # Errors
///
/// [`Error::VersionIncompatible`] when the recorded version is strictly
/// greater than the running one. The override is manual by design: the
/// operator edits the `version:` line in the ledger file.
pub fn check_compatible(recorded: Option<&Version>, running: &Version) -> Result<()> {
    match recorded {
        Some(recorded) if recorded > running => Err(Error::VersionIncompatible {
            recorded: recorded.clone(),
            running: running.clone(),
        }),
        _ => Ok(()),
    }
}

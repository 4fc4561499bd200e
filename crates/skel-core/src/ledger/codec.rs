//! Line-oriented codec for the `.skelgen` ledger file
//!
//! The format is deliberately plain text so operators can inspect it
//! and, when the version gate demands it, edit the `version:` line:
//!
//! ```text
//! # comment
//! version:0.4.0
//! <32-hex-digit fingerprint>:<project-relative path>
//! ```
//!
//! Legacy files delimit entries with a space instead of a colon; that
//! form is accepted on read only.

use std::collections::BTreeMap;
use std::path::Path;

use semver::Version;
use skel_fs::Fingerprint;

use crate::{Error, Result};

const HEADER: &str = "\
# Managed by skelgen. Do not edit by hand.
# One content+permission fingerprint per generated file, so unchanged
# files are left alone on regeneration.
";

/// Parsed ledger contents: recorded tool version and fingerprint entries.
#[derive(Debug, Default)]
pub struct Decoded {
    pub version: Option<Version>,
    pub entries: BTreeMap<String, Fingerprint>,
}

/// Decode the persisted ledger text.
///
/// # Errors
///
/// Any line that is not a comment, a `version:` header or a
/// fingerprint entry yields [`Error::LedgerCorrupt`] with its 1-based
/// line number. A half-parsed ledger would silently break change
/// detection, so there is no skip-and-continue.
pub fn decode(text: &str) -> Result<Decoded> {
    let mut decoded = Decoded::default();

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        // Colon-delimited entries, falling back to the legacy space form
        let (key, value) = line
            .split_once(':')
            .or_else(|| line.split_once(' '))
            .ok_or_else(|| corrupt(lineno, line))?;

        if key == "version" {
            // Last occurrence wins
            decoded.version =
                Some(Version::parse(value.trim()).map_err(|_| corrupt(lineno, line))?);
        } else {
            let fingerprint: Fingerprint =
                key.parse().map_err(|_| corrupt(lineno, line))?;
            decoded.entries.insert(value.to_string(), fingerprint);
        }
    }

    Ok(decoded)
}

/// Encode the ledger for persistence.
///
/// Entries whose path no longer exists under `root` are dropped from
/// the output; the next load simply never sees them. The special `.`
/// entry (the aggregate-configuration fingerprint) always survives the
/// existence check because the project root itself exists.
pub fn encode(
    version: Option<&Version>,
    entries: &BTreeMap<String, Fingerprint>,
    root: &Path,
) -> String {
    let mut out = String::from(HEADER);

    if let Some(version) = version {
        out.push_str(&format!("version:{version}\n"));
    }

    for (path, fingerprint) in entries {
        if !root.join(path).exists() {
            tracing::debug!(path = %path, "dropping ledger entry for vanished file");
            continue;
        }
        out.push_str(&format!("\n# {path}\n{fingerprint}:{path}\n"));
    }

    out
}

fn corrupt(line: usize, text: &str) -> Error {
    Error::LedgerCorrupt {
        line,
        text: text.to_string(),
    }
}

//! Content+permission fingerprints
//!
//! A fingerprint digests a file's content together with its owner
//! permission triad. Two files with the same content and the same
//! owner read/write/execute bits fingerprint identically no matter
//! what their group/other bits say; flipping the owner execute bit
//! changes the fingerprint. Shell scripts are normalized by stripping
//! carriage returns first, so checkout line-ending translation does
//! not register as a change.

use md5::{Digest, Md5};
use std::path::Path;

use crate::constants::SHELL_EXTENSION;
use crate::{Error, Result, io};

/// Separator between content and permission value in the hashed input.
const SEPARATOR: &[u8] = b"|";

/// A 128-bit content+permission fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl std::str::FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidFingerprint {
                value: s.to_string(),
            });
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).map_err(|_| {
                Error::InvalidFingerprint {
                    value: s.to_string(),
                }
            })?;
        }
        Ok(Self(bytes))
    }
}

/// Extract the owner read/write/execute triad from full permission bits.
fn owner_triad(mode: u32) -> u32 {
    (mode >> 6) & 0o7
}

fn is_shell_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SHELL_EXTENSION)
}

/// Compute the fingerprint of `content` as it would be stored at `path`
/// with permission bits `mode`.
///
/// Pure: identical inputs always produce identical fingerprints.
pub fn fingerprint(path: &Path, content: &[u8], mode: u32) -> Fingerprint {
    let mut hasher = Md5::new();
    if is_shell_script(path) {
        let normalized: Vec<u8> = content.iter().copied().filter(|&b| b != b'\r').collect();
        hasher.update(&normalized);
    } else {
        hasher.update(content);
    }
    hasher.update(SEPARATOR);
    hasher.update(owner_triad(mode).to_string().as_bytes());
    Fingerprint(hasher.finalize().into())
}

/// Fingerprint a file as it currently exists on disk.
///
/// # Errors
///
/// Returns an error if the file or its metadata cannot be read.
pub fn file_fingerprint(path: &Path) -> Result<Fingerprint> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let mode = io::read_mode(path)?;
    Ok(fingerprint(path, &content, mode))
}

/// Compare two permission values on the owner triad only.
///
/// Used for change detection where the fingerprint itself is not needed.
pub fn permissions_match(a: u32, b: u32) -> bool {
    owner_triad(a) == owner_triad(b)
}

//! Filesystem layer for skelgen
//!
//! Provides the content+permission fingerprint function and the write
//! primitives the ledger uses to materialize generated files.

pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod io;

pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use fingerprint::{Fingerprint, file_fingerprint, fingerprint, permissions_match};

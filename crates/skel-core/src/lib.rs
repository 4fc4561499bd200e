//! Change-tracking ledger for skelgen
//!
//! The ledger remembers one content+permission fingerprint per generated
//! file so a later run can tell which files actually changed, leave
//! unchanged files alone, and keep the git index in step with what the
//! generator produced.
//!
//! # Architecture
//!
//! `skel-core` sits above the two leaf crates:
//!
//! ```text
//!      generation layer
//!            |
//!       skel-core        (store, codec, save, version gate, transaction)
//!        |       |
//!     skel-fs  skel-git
//! ```
//!
//! # Example
//!
//! ```ignore
//! use semver::Version;
//! use skel_core::{Result, with_ledger};
//!
//! fn regenerate(root: &std::path::Path, tool_version: &Version) -> Result<()> {
//!     with_ledger(root, tool_version, true, |ledger| {
//!         ledger.queue_write(true, "build.sh", b"#!/bin/sh\n".to_vec(), 0o755);
//!         Ok(())
//!     })
//! }
//! ```

pub mod error;
pub mod ledger;
pub mod transaction;
pub mod version;

pub use error::{Error, Result};
pub use ledger::LedgerStore;
pub use transaction::with_ledger;
pub use version::check_compatible;

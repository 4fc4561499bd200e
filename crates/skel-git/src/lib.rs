//! Version-control staging for skelgen
//!
//! Wraps the two index operations the ledger needs: batch
//! stage-for-addition and batch stage-for-removal.

pub mod error;
pub mod staging;

pub use error::{Error, Result};
pub use staging::{discover, stage_additions, stage_removals};

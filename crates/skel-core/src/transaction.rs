//! The load → gate → mutate → save transaction
//!
//! [`with_ledger`] is the single entry point the generation layer goes
//! through. It guarantees the ledger is saved even when the body fails
//! partway, so completed file writes are never lost from bookkeeping.

use std::path::Path;

use semver::Version;

use crate::ledger::LedgerStore;
use crate::{Error, version};

/// Run `body` inside a ledger transaction for the project at `root`.
///
/// Loads the store, runs the version gate against `running`, then
/// hands the store to `body`. On success the store is saved with
/// `vcs_enabled` deciding whether staging runs. On failure the store
/// is still saved — with staging always attempted, since files written
/// before the failure deserve the same bookkeeping — and the body's
/// original error is returned unchanged; a failure of that rescue save
/// is only logged.
///
/// Generic over the caller's error type so error identity survives the
/// wrapper; anything raised here converts in via `From<Error>`.
pub fn with_ledger<T, E, F>(
    root: &Path,
    running: &Version,
    vcs_enabled: bool,
    body: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&mut LedgerStore) -> std::result::Result<T, E>,
    E: From<Error>,
{
    let mut store = LedgerStore::load(root).map_err(E::from)?;
    version::check_compatible(store.version(), running).map_err(E::from)?;

    match body(&mut store) {
        Ok(value) => {
            store.save(vcs_enabled).map_err(E::from)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(save_err) = store.save(true) {
                tracing::warn!(
                    error = %save_err,
                    "failed to save ledger after generation failure"
                );
            }
            Err(err)
        }
    }
}

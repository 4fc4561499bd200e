//! The ledger store and its save protocol
//!
//! A [`LedgerStore`] is loaded at the start of a transaction, mutated
//! in memory only, and flushed once by [`LedgerStore::save`]. Exactly
//! one transaction owns the store for its whole lifetime; nothing here
//! is safe to share between concurrent transactions.

pub mod codec;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use semver::Version;
use skel_fs::{Fingerprint, ProjectPath, fingerprint, io};

use crate::{Error, Result};

/// A file write queued during the transaction, flushed on save.
#[derive(Debug)]
struct PendingWrite {
    /// Capture the resulting fingerprint into the entry set after writing
    record: bool,
    path: String,
    content: Vec<u8>,
    mode: u32,
}

/// In-memory ledger state for a single transaction.
///
/// Holds the fingerprint entries read from `.skelgen`, the writes and
/// version-control staging queued so far, and the dirty flag that
/// decides whether save does anything at all.
#[derive(Debug)]
pub struct LedgerStore {
    root: PathBuf,
    entries: BTreeMap<String, Fingerprint>,
    version: Option<Version>,
    pending_writes: Vec<PendingWrite>,
    to_add: BTreeSet<String>,
    to_remove: BTreeSet<String>,
    modified: bool,
}

impl LedgerStore {
    /// Load the ledger for the project at `root`.
    ///
    /// A missing ledger file yields an empty store; a malformed one is
    /// fatal ([`Error::LedgerCorrupt`]).
    pub fn load(root: &Path) -> Result<Self> {
        let ledger_path = root.join(ProjectPath::LedgerFile);

        let decoded = if ledger_path.exists() {
            let text = std::fs::read_to_string(&ledger_path)
                .map_err(|e| skel_fs::Error::io(&ledger_path, e))?;
            codec::decode(&text)?
        } else {
            tracing::debug!(path = %ledger_path.display(), "no ledger file, starting empty");
            codec::Decoded::default()
        };

        Ok(Self {
            root: root.to_path_buf(),
            entries: decoded.entries,
            version: decoded.version,
            pending_writes: Vec::new(),
            to_add: BTreeSet::new(),
            to_remove: BTreeSet::new(),
            modified: false,
        })
    }

    /// Project root this ledger belongs to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Minimum tool version recorded in the ledger header, if any.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Whether any mutating operation ran since load or the last save.
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Paths currently tracked by the ledger.
    ///
    /// Reflects loaded state plus completed `update`/`remove`/`rename`
    /// calls; queued writes appear only after [`save`](Self::save)
    /// flushes them.
    pub fn tracked_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up the fingerprint recorded for `path`.
    ///
    /// Pending writes are invisible here until save runs; `get` answers
    /// from the entry set only.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the path is untracked, which callers
    /// commonly use to detect "never generated before".
    pub fn get(&self, path: &str) -> Result<Fingerprint> {
        self.entries
            .get(path)
            .copied()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    /// Queue a file write for the save phase.
    ///
    /// Nothing touches the disk yet. When `record` is true the
    /// fingerprint of the written file is captured into the entry set
    /// during save.
    pub fn queue_write(&mut self, record: bool, path: impl Into<String>, content: Vec<u8>, mode: u32) {
        self.pending_writes.push(PendingWrite {
            record,
            path: path.into(),
            content,
            mode,
        });
        self.modified = true;
    }

    /// Record `fingerprint` for `path`, optionally staging the path for
    /// version-control addition.
    ///
    /// Callers pass `stage = false` for bookkeeping-only entries such
    /// as the `.` aggregate-configuration fingerprint.
    pub fn update(&mut self, path: &str, fingerprint: Fingerprint, stage: bool) {
        self.entries.insert(path.to_string(), fingerprint);
        if stage {
            self.to_add.insert(path.to_string());
        }
        self.modified = true;
    }

    /// Stop tracking `path` and queue it for version-control removal.
    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
        self.to_remove.insert(path.to_string());
        self.modified = true;
    }

    /// Migrate the fingerprint recorded under `old` to `new`.
    ///
    /// Renaming an untracked path is a no-op, not an error: the store
    /// is left byte-for-byte unchanged, dirty flag included.
    pub fn rename(&mut self, old: &str, new: &str) {
        let Some(fingerprint) = self.entries.get(old).copied() else {
            return;
        };
        self.remove(old);
        self.update(new, fingerprint, true);
    }

    /// Record the minimum tool version able to regenerate this project.
    pub fn set_version(&mut self, version: Version) {
        self.version = Some(version);
        self.modified = true;
    }

    /// Flush the transaction: write queued files, rewrite `.skelgen`,
    /// drive version-control staging, clear pending state.
    ///
    /// No-op when nothing was modified. Ordering is load-bearing:
    /// queued writes land first so their fingerprints and existence
    /// checks see the final disk state, then the ledger file is
    /// rewritten, then staging runs against what actually exists.
    ///
    /// # Errors
    ///
    /// I/O and git failures propagate to the caller. The ledger file is
    /// rewritten wholesale on every save, so a failed save is repaired
    /// by re-running rather than by recovery logic.
    pub fn save(&mut self, vcs_enabled: bool) -> Result<()> {
        if !self.modified {
            return Ok(());
        }

        for write in std::mem::take(&mut self.pending_writes) {
            let target = self.root.join(&write.path);
            io::materialize(&target, &write.content, write.mode)?;
            if write.record {
                let fp = fingerprint(Path::new(&write.path), &write.content, write.mode);
                self.update(&write.path, fp, true);
            }
        }

        let text = codec::encode(self.version.as_ref(), &self.entries, &self.root);
        let ledger_path = self.root.join(ProjectPath::LedgerFile);
        io::write_atomic(&ledger_path, text.as_bytes())?;

        if vcs_enabled {
            self.stage()?;
        } else {
            tracing::debug!("version-control staging disabled for this save");
        }

        self.to_add.clear();
        self.to_remove.clear();
        self.modified = false;
        Ok(())
    }

    /// Issue the two staging batches.
    ///
    /// Existence on disk is the deciding filter, not queue membership:
    /// only vanished paths are staged for removal, only still-present
    /// paths (plus the ledger file itself) for addition.
    fn stage(&self) -> Result<()> {
        let Some(repo) = skel_git::discover(&self.root) else {
            tracing::debug!(root = %self.root.display(), "no version-control root, staging skipped");
            return Ok(());
        };

        let removals: Vec<String> = self
            .to_remove
            .iter()
            .filter(|path| !self.root.join(path).exists())
            .cloned()
            .collect();
        skel_git::stage_removals(&repo, &self.root, &removals)?;

        let mut additions: Vec<String> = self
            .to_add
            .iter()
            .filter(|path| self.root.join(path).exists())
            .cloned()
            .collect();
        additions.push(ProjectPath::LedgerFile.as_str().to_string());
        skel_git::stage_additions(&repo, &self.root, &additions)?;

        Ok(())
    }
}

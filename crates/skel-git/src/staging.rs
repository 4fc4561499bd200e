//! Batch index staging
//!
//! The ledger issues at most two staging calls per save: one removal
//! batch for files that vanished from disk and one addition batch for
//! files that were (re)generated, plus the ledger file itself. Both
//! operate directly on the git index rather than shelling out.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::{Error, Result};

/// Find the repository containing `root`, if any.
///
/// Returns `None` when no version-control root marker is present, in
/// which case staging is skipped entirely.
pub fn discover(root: &Path) -> Option<Repository> {
    match Repository::discover(root) {
        Ok(repo) => Some(repo),
        Err(e) => {
            tracing::debug!(root = %root.display(), error = %e, "no git repository found");
            None
        }
    }
}

/// Stage a batch of project-relative paths for addition.
///
/// Paths that were filtered out by the caller (nonexistent files) must
/// not appear here; `git2` refuses to add a path with no file behind it.
pub fn stage_additions(repo: &Repository, project_root: &Path, paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let mut index = repo.index()?;
    for path in paths {
        let rel = index_relative(repo, project_root, path)?;
        index.add_path(&rel)?;
    }
    index.write()?;
    Ok(())
}

/// Stage a batch of project-relative paths for removal.
///
/// A path absent from the index is skipped: the file may never have
/// been committed before it was deleted, which is not an error.
pub fn stage_removals(repo: &Repository, project_root: &Path, paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let mut index = repo.index()?;
    for path in paths {
        let rel = index_relative(repo, project_root, path)?;
        match index.remove_path(&rel) {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(path = %rel.display(), "removal of untracked path skipped");
            }
            Err(e) => return Err(e.into()),
        }
    }
    index.write()?;
    Ok(())
}

/// Resolve a project-relative path to its index-relative form.
///
/// The project root may sit below the repository's working tree, so
/// the two relative frames are not always the same.
fn index_relative(repo: &Repository, project_root: &Path, path: &str) -> Result<PathBuf> {
    let workdir = canonical(repo.workdir().ok_or(Error::BareRepository)?)?;
    // Only the root is resolved; the leaf may already be deleted.
    let absolute = canonical(project_root)?.join(path);

    absolute
        .strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideWorkTree { path: absolute })
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

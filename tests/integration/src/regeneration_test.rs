//! End-to-end regeneration scenarios: a fake generation layer driving
//! the ledger across multiple runs against a real git repository.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use semver::Version;
use skel_core::{Error, with_ledger};
use skel_fs::{ProjectPath, file_fingerprint, fingerprint};
use tempfile::TempDir;

const TOOL: Version = Version::new(1, 0, 0);

/// First run generates everything; a second run with identical inputs
/// detects every file as unchanged and rewrites nothing.
#[test]
fn second_run_with_identical_inputs_rewrites_nothing() {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();

    let files: &[(&str, &[u8], u32)] = &[
        ("README.md", b"# demo\n", 0o644),
        ("src/main.rs", b"fn main() {}\n", 0o644),
        ("build.sh", b"#!/bin/sh\necho build\n", 0o755),
    ];

    let result: Result<(), Error> = with_ledger(temp.path(), &TOOL, true, |ledger| {
        for (path, content, mode) in files {
            ledger.queue_write(true, *path, content.to_vec(), *mode);
        }
        ledger.set_version(TOOL);
        Ok(())
    });
    result.unwrap();

    // second run: everything fingerprints identically, nothing is queued
    let rewritten: Result<usize, Error> = with_ledger(temp.path(), &TOOL, true, |ledger| {
        let mut count = 0;
        for (path, content, mode) in files {
            let recorded = ledger.get(path)?;
            if recorded != fingerprint(Path::new(path), content, *mode) {
                ledger.queue_write(true, *path, content.to_vec(), *mode);
                count += 1;
            }
        }
        Ok(count)
    });
    assert_eq!(rewritten.unwrap(), 0);
}

/// Editing a generated file by hand makes exactly that file show up as
/// changed on the next run.
#[test]
fn hand_edited_file_is_detected_as_changed() {
    let temp = TempDir::new().unwrap();

    let result: Result<(), Error> = with_ledger(temp.path(), &TOOL, false, |ledger| {
        ledger.queue_write(true, "a.txt", b"a\n".to_vec(), 0o644);
        ledger.queue_write(true, "b.txt", b"b\n".to_vec(), 0o644);
        Ok(())
    });
    result.unwrap();

    fs::write(temp.path().join("b.txt"), "edited by hand\n").unwrap();

    let changed: Result<Vec<String>, Error> = with_ledger(temp.path(), &TOOL, false, |ledger| {
        let mut changed = Vec::new();
        for path in ["a.txt", "b.txt"] {
            let on_disk = file_fingerprint(&ledger.root().join(path))?;
            if ledger.get(path)? != on_disk {
                changed.push(path.to_string());
            }
        }
        Ok(changed)
    });
    assert_eq!(changed.unwrap(), vec!["b.txt".to_string()]);
}

/// A full relayout: one file renamed, one removed, one added, with the
/// git index tracking every step.
#[test]
fn relayout_keeps_ledger_and_index_in_sync() {
    let temp = TempDir::new().unwrap();
    let repo = git2::Repository::init(temp.path()).unwrap();

    let result: Result<(), Error> = with_ledger(temp.path(), &TOOL, true, |ledger| {
        ledger.queue_write(true, "lib.rs", b"// v1\n".to_vec(), 0o644);
        ledger.queue_write(true, "obsolete.txt", b"going away\n".to_vec(), 0o644);
        Ok(())
    });
    result.unwrap();

    // move lib.rs into src/, drop obsolete.txt, add a script
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::rename(temp.path().join("lib.rs"), temp.path().join("src/lib.rs")).unwrap();
    fs::remove_file(temp.path().join("obsolete.txt")).unwrap();

    let result: Result<(), Error> = with_ledger(temp.path(), &TOOL, true, |ledger| {
        ledger.rename("lib.rs", "src/lib.rs");
        ledger.remove("obsolete.txt");
        ledger.queue_write(true, "run.sh", b"#!/bin/sh\n".to_vec(), 0o755);
        Ok(())
    });
    result.unwrap();

    let reloaded = skel_core::LedgerStore::load(temp.path()).unwrap();
    let tracked: Vec<&str> = reloaded.tracked_paths().collect();
    assert_eq!(tracked, vec!["run.sh", "src/lib.rs"]);

    let index = repo.index().unwrap();
    assert!(index.get_path(Path::new("src/lib.rs"), 0).is_some());
    assert!(index.get_path(Path::new("run.sh"), 0).is_some());
    assert!(index.get_path(Path::new("obsolete.txt"), 0).is_none());
    assert!(
        index
            .get_path(Path::new(ProjectPath::LedgerFile.as_str()), 0)
            .is_some()
    );
}

/// The aggregate-configuration fingerprint under `.` drives a
/// skip-everything fast path when the configuration is unchanged.
#[test]
fn unchanged_configuration_short_circuits() {
    let temp = TempDir::new().unwrap();
    let config = b"[project]\nname = \"demo\"\n";
    let config_fp = fingerprint(Path::new("."), config, 0o644);

    let result: Result<(), Error> = with_ledger(temp.path(), &TOOL, false, |ledger| {
        ledger.update(".", config_fp, false);
        ledger.queue_write(true, "gen.txt", b"gen\n".to_vec(), 0o644);
        Ok(())
    });
    result.unwrap();

    let regenerated: Result<bool, Error> = with_ledger(temp.path(), &TOOL, false, |ledger| {
        if ledger.get(".")? == config_fp {
            return Ok(false);
        }
        ledger.queue_write(true, "gen.txt", b"gen\n".to_vec(), 0o644);
        Ok(true)
    });
    assert!(!regenerated.unwrap());

    // the `.` entry survives saves even though no such file exists
    let reloaded = skel_core::LedgerStore::load(temp.path()).unwrap();
    assert_eq!(reloaded.get(".").unwrap(), config_fp);
}

/// A stale binary is locked out after a newer one raised the recorded
/// version.
#[test]
fn stale_tool_is_refused_until_ledger_is_edited() {
    let temp = TempDir::new().unwrap();

    let newer = Version::new(2, 0, 0);
    let result: Result<(), Error> = with_ledger(temp.path(), &newer, false, |ledger| {
        ledger.set_version(newer.clone());
        ledger.queue_write(true, "gen.txt", b"new layout\n".to_vec(), 0o644);
        Ok(())
    });
    result.unwrap();

    let refused: Result<(), Error> = with_ledger(temp.path(), &TOOL, false, |_ledger| Ok(()));
    assert_eq!(refused.unwrap_err().exit_code(), 2);

    // manual override: operator edits the version line
    let ledger_file = temp.path().join(ProjectPath::LedgerFile.as_str());
    let text = fs::read_to_string(&ledger_file).unwrap();
    fs::write(&ledger_file, text.replace("version:2.0.0", "version:1.0.0")).unwrap();

    let allowed: Result<(), Error> = with_ledger(temp.path(), &TOOL, false, |_ledger| Ok(()));
    allowed.unwrap();
}

//! End-to-end tests for the `mdl` binary.
//!
//! These tests avoid the network entirely: either the run fails before
//! resolution (syntax errors), or every url is served by the persisted
//! dlist cache and gated by the completion log, so yt-dlp is never
//! spawned.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdl() -> Command {
    Command::cargo_bin("mdl").unwrap()
}

// ==================== Fatal parse errors ====================

#[test]
fn test_invalid_syntax_fails_with_line_number() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("catalogue"),
        "# fine\n\nthis is not a directive\n",
    )
    .unwrap();

    mdl()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid syntax at line 3"));

    // no output files on a fatal parse error
    assert!(!dir.path().join(".dlist").exists());
    assert!(!dir.path().join(".archive").exists());
}

#[test]
fn test_missing_catalogue_fails() {
    let dir = TempDir::new().unwrap();

    mdl()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read catalogue"));
}

// ==================== Fully cached, fully archived run ====================

#[test]
fn test_cached_and_archived_run_completes_without_ytdlp() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("catalogue"),
        "PLAYLISTS mix\nhttps://example.com/1\nhttps://example.com/2\n",
    )
    .unwrap();
    // Previous run's dlist: both urls cached, so no resolution happens.
    std::fs::write(
        dir.path().join(".dlist"),
        "Artist,one,Album,1,https://example.com/1\nArtist,two,Album,2,https://example.com/2\n",
    )
    .unwrap();
    // Both urls already downloaded, so no fetch happens.
    std::fs::write(
        dir.path().join(".archive"),
        "https://example.com/1\nhttps://example.com/2\n",
    )
    .unwrap();

    mdl().current_dir(dir.path()).assert().success();

    let playlist = std::fs::read_to_string(dir.path().join("mix.m3u")).unwrap();
    let lines: Vec<_> = playlist.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("one ["));
    assert!(lines[1].starts_with("two ["));
    assert!(lines.iter().all(|l| l.ends_with(".opus")));

    // dlist rewritten with the same entries
    let dlist = std::fs::read_to_string(dir.path().join(".dlist")).unwrap();
    assert!(dlist.contains("https://example.com/1"));
    assert!(dlist.contains("https://example.com/2"));
}

#[test]
fn test_empty_catalogue_succeeds() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("catalogue"), "# nothing here yet\n").unwrap();

    mdl().current_dir(dir.path()).assert().success();
    assert!(dir.path().join(".dlist").exists());
}

// ==================== Flags ====================

#[test]
fn test_help_describes_catalogue_argument() {
    mdl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalogue"));
}

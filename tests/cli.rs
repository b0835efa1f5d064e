//! End-to-end runs of the `splitlog` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{TempDir, tempdir};

fn run(root: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_splitlog"))
        .arg("--config")
        .arg(root.path().join("missing.toml"))
        .arg("--root")
        .arg(root.path())
        .args(["--app", "cli-test"])
        .args(args)
        .env_remove("SPLITLOG_INTERNAL")
        .output()
        .unwrap()
}

fn find(dir: &Path, name: &str) -> Option<PathBuf> {
    for entry in fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find(&path, name) {
                return Some(found);
            }
        } else if path.file_name().is_some_and(|n| n == name) {
            return Some(path);
        }
    }
    None
}

#[test]
fn info_goes_to_debug_stream_and_stdout() {
    let root = tempdir().unwrap();
    let out = run(&root, &["info", "hello", "world"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\tINFO\t"));
    assert!(stdout.contains("hello world"));

    let debug = find(root.path(), "debug.log").unwrap();
    assert!(fs::read_to_string(debug).unwrap().contains("hello world"));
    assert!(find(root.path(), "err.log").is_none());
}

#[test]
fn simple_flag_keeps_errors_in_debug_stream() {
    let root = tempdir().unwrap();
    let out = run(&root, &["--simple", "error", "bad"]);

    assert!(out.status.success());
    let debug = find(root.path(), "debug.log").unwrap();
    assert!(fs::read_to_string(debug).unwrap().contains("\tERROR\t"));
    assert!(find(root.path(), "err.log").is_none());
}

#[test]
fn exit_writes_marker_and_fails() {
    let root = tempdir().unwrap();
    let out = run(&root, &["exit", "boom"]);

    assert!(!out.status.success());
    #[cfg(unix)]
    assert_eq!(out.status.code(), Some(255));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("boom\t === err exit === "), "{stdout}");

    let err = fs::read_to_string(find(root.path(), "err.log").unwrap()).unwrap();
    assert!(err.contains("\tERROR\t"));
    assert!(err.contains("=== err exit ==="));
}

#[test]
fn unknown_level_is_rejected() {
    let root = tempdir().unwrap();
    let out = run(&root, &["loud", "x"]);
    assert!(!out.status.success());
    assert!(find(root.path(), "debug.log").is_none());
}

//! End-to-end tests for the launcher binary.
//!
//! Each test points `PYTHON` at a stand-in shell script so no real Python
//! interpreter is needed: the stand-in observes the arguments and streams the
//! launcher hands to its child.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_testlaunch");

/// Write an executable shell script into `dir` that acts as the interpreter.
fn write_stand_in(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("stand_in.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn launcher_cmd(src_dir: &Path, stand_in: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("SRC_DIR", src_dir).env("PYTHON", stand_in);
    cmd
}

#[test]
fn propagates_child_exit_code_zero() {
    let dir = TempDir::new().unwrap();
    let stand_in = write_stand_in(dir.path(), "exit 0");

    let status = launcher_cmd(dir.path(), &stand_in).status().unwrap();
    assert_eq!(status.code(), Some(0));
}

#[test]
fn propagates_child_exit_code_one_exactly() {
    let dir = TempDir::new().unwrap();
    let stand_in = write_stand_in(dir.path(), "exit 1");

    let status = launcher_cmd(dir.path(), &stand_in).status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn propagates_larger_exit_codes_unmapped() {
    let dir = TempDir::new().unwrap();
    let stand_in = write_stand_in(dir.path(), "exit 42");

    let status = launcher_cmd(dir.path(), &stand_in).status().unwrap();
    assert_eq!(status.code(), Some(42));
}

#[test]
fn invokes_unittest_against_test_dir_and_forwards_args_in_order() {
    let dir = TempDir::new().unwrap();
    // Print each received argument on its own line.
    let stand_in = write_stand_in(dir.path(), "printf '%s\\n' \"$@\"");

    let output = launcher_cmd(dir.path(), &stand_in)
        .args(["-v", "TestFoo"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    let test_path = dir.path().join("test");
    assert_eq!(
        lines,
        vec![
            "-m",
            "unittest",
            test_path.to_str().unwrap(),
            "-v",
            "TestFoo",
        ]
    );
}

#[test]
fn feeds_stdin_through_to_the_child() {
    let dir = TempDir::new().unwrap();
    let stand_in = write_stand_in(dir.path(), "cat");

    let mut child = launcher_cmd(dir.path(), &stand_in)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"hello from the launcher\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"hello from the launcher\n");
}

#[test]
fn missing_src_dir_fails_before_spawning_anything() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("ran");
    let stand_in = write_stand_in(dir.path(), &format!("touch {}", marker.display()));

    let output = Command::new(BIN)
        .env_remove("SRC_DIR")
        .env("PYTHON", &stand_in)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SRC_DIR"), "stderr was: {stderr}");
    assert!(!marker.exists(), "runner was spawned despite missing SRC_DIR");
}

#[test]
fn unlaunchable_interpreter_is_reported_distinctly() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no_such_interpreter");

    let output = Command::new(BIN)
        .env("SRC_DIR", dir.path())
        .env("PYTHON", &missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to launch"), "stderr was: {stderr}");
}

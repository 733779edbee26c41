//! `orfs realtime` end to end

use crate::common::{exit_code, run_orfs, stderr_of, stdout_of};
use crate::support::fixtures::install_fixture;

use std::fs;
use tempfile::TempDir;

#[test]
fn test_json_realtime_feed_passes() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "realtime_feed");

    let output = run_orfs(dir.path(), &["realtime", feed.to_str().unwrap()]);

    assert_eq!(exit_code(&output), 0);
    assert!(stdout_of(&output).contains("(JSON format)"));
    assert!(stdout_of(&output).contains("has valid structure"));
}

#[test]
fn test_json_realtime_feed_problems() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "realtime_broken");

    let output = run_orfs(dir.path(), &["realtime", feed.to_str().unwrap()]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains("Realtime feed missing required 'entity' field"));
    assert!(stdout.contains("Invalid incrementality value: \"SOMETIMES\""));
}

#[test]
fn test_binary_feed_gets_size_check_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.pb"), [0x0a, 0x03, 0x31, 0x2e, 0x32]).unwrap();

    let output = run_orfs(dir.path(), &["realtime", "feed.pb"]);

    assert_eq!(exit_code(&output), 0);
    assert!(stdout_of(&output).contains("exists and is not empty (5 bytes)"));
    assert!(stderr_of(&output).contains("protocol buffer decoding is not supported"));
}

#[test]
fn test_empty_binary_feed_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.pb"), b"").unwrap();

    let output = run_orfs(dir.path(), &["realtime", "feed.pb"]);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout_of(&output).contains("File is empty: feed.pb"));
}

#[test]
fn test_missing_realtime_feed_is_a_load_error() {
    let dir = TempDir::new().unwrap();

    let output = run_orfs(dir.path(), &["realtime", "missing.pb"]);

    assert_eq!(exit_code(&output), 2);
}

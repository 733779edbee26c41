//! `orfs static` end to end

use crate::common::{exit_code, run_orfs, stderr_of, stdout_of};
use crate::support::fixtures::{fixture_path, install_fixture};

use std::fs;
use tempfile::TempDir;

#[test]
fn test_conforming_feed_passes() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");
    let schema = fixture_path("feed_schema");

    let output = run_orfs(
        dir.path(),
        &[
            "static",
            feed.to_str().unwrap(),
            "--schema",
            schema.to_str().unwrap(),
        ],
    );

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("is valid according to the JSON schema"));
}

#[test]
fn test_every_schema_violation_is_listed() {
    let dir = TempDir::new().unwrap();
    let feed = dir.path().join("feed.json");
    fs::write(
        &feed,
        r#"{"header": {"version": 12}, "restaurants": [{"name": "No id"}]}"#,
    )
    .unwrap();
    let schema = fixture_path("feed_schema");

    let output = run_orfs(
        dir.path(),
        &[
            "static",
            feed.to_str().unwrap(),
            "--schema",
            schema.to_str().unwrap(),
        ],
    );
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains("Schema validation failed with 2 errors:"));
    assert!(stdout.contains("at '/header/version'"));
    assert!(stdout.contains("at '/restaurants/0'"));
}

#[test]
fn test_schema_from_project_config() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");
    install_fixture(dir.path(), "feed_schema");
    fs::write(dir.path().join("orfs.yaml"), "schema: feed_schema.json\n").unwrap();

    let output = run_orfs(dir.path(), &["static", feed.to_str().unwrap()]);

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr_of(&output));
}

#[test]
fn test_missing_schema_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");

    let output = run_orfs(dir.path(), &["static", feed.to_str().unwrap()]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("No schema configured"));
}

#[test]
fn test_unparseable_schema_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");
    let schema = dir.path().join("schema.json");
    fs::write(&schema, "not a schema").unwrap();

    let output = run_orfs(
        dir.path(),
        &[
            "static",
            feed.to_str().unwrap(),
            "--schema",
            schema.to_str().unwrap(),
        ],
    );

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("Failed to parse schema as JSON"));
}

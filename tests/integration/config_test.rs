//! Config files and CLI-level behaviour

use crate::common::{exit_code, run_orfs, stderr_of, stdout_of};
use crate::support::fixtures::install_fixture;

use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_project_config_enables_rule_sets() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "weak_copy");
    fs::write(
        dir.path().join("orfs.yaml"),
        "checks:\n  content_quality: true\n",
    )
    .unwrap();

    let output = run_orfs(dir.path(), &["marketing", "weak_copy.json"]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains("[content.punctuation]"));
    assert!(!stdout.contains("[seo.unused_keyword]"));
}

#[test]
fn test_project_config_overrides_global() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "weak_copy");

    let global_dir = dir.path().join(".config/orfs");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.yaml"),
        "checks:\n  seo_check: true\n  content_quality: true\noutput:\n  format: json\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("orfs.yaml"),
        "checks:\n  content_quality: false\n",
    )
    .unwrap();

    let output = run_orfs(dir.path(), &["marketing", "weak_copy.json"]);
    assert_eq!(exit_code(&output), 1);

    let body: Value = serde_json::from_str(&stdout_of(&output)).expect("global format is json");
    let issues = body["report"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| i["rule_set"] == "seo"));
}

#[test]
fn test_format_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "valid_feed");
    fs::write(dir.path().join("orfs.yaml"), "output:\n  format: json\n").unwrap();

    let output = run_orfs(
        dir.path(),
        &["marketing", "valid_feed.json", "--format", "text"],
    );

    assert_eq!(exit_code(&output), 0);
    assert!(stdout_of(&output).contains("pass validation checks"));
}

#[test]
fn test_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "valid_feed");
    let conf_dir = dir.path().join("conf");
    fs::create_dir_all(&conf_dir).unwrap();
    install_fixture(&conf_dir, "feed_schema");
    fs::write(conf_dir.join("ci.yaml"), "schema: feed_schema.json\n").unwrap();
    // ignored when --config is given
    fs::write(dir.path().join("orfs.yaml"), "schema: missing.json\n").unwrap();

    let output = run_orfs(
        dir.path(),
        &["--config", "conf/ci.yaml", "static", "valid_feed.json"],
    );

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr_of(&output));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "valid_feed");

    let output = run_orfs(
        dir.path(),
        &["--config", "nope.yaml", "marketing", "valid_feed.json"],
    );

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("Failed to read config from nope.yaml"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "valid_feed");
    fs::write(dir.path().join("orfs.yaml"), "parallel:\n  jobs: 0\n").unwrap();

    let output = run_orfs(dir.path(), &["marketing", "valid_feed.json"]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("parallel.jobs must be greater than 0"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let dir = TempDir::new().unwrap();
    install_fixture(dir.path(), "valid_feed");

    let output = run_orfs(
        dir.path(),
        &["--verbose", "marketing", "valid_feed.json", "--format", "json"],
    );

    assert_eq!(exit_code(&output), 0);
    let body: Value = serde_json::from_str(&stdout_of(&output)).expect("stdout stays JSON");
    assert_eq!(body["passed"], Value::Bool(true));
    assert!(stderr_of(&output).contains("validation finished"));
}

#[test]
fn test_completion_script() {
    let dir = TempDir::new().unwrap();

    let output = run_orfs(dir.path(), &["completion", "bash"]);

    assert_eq!(exit_code(&output), 0);
    let script = stdout_of(&output);
    assert!(script.contains("_orfs"));
    assert!(script.contains("marketing"));
}

//! `orfs marketing` end to end

use crate::common::{exit_code, run_orfs, stderr_of, stdout_of};
use crate::support::fixtures::{fixture_path, install_fixture};

use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn marketing(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let mut full = vec!["marketing"];
    full.extend_from_slice(args);
    run_orfs(dir.path(), &full)
}

#[test]
fn test_valid_feed_passes_every_rule_set() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");

    let output = marketing(&dir, &[feed.to_str().unwrap(), "--all-checks"]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 0, "stdout: {}", stdout);
    assert!(stdout.contains("ORFS 1.2"));
    assert!(stdout.contains("Provider: Harbor Kitchen"));
    assert!(stdout.contains("Generated: 2023-11-14 22:13:20 UTC"));
    assert!(stdout.contains("SEO Analysis:"));
    assert!(stdout.contains("pass validation checks"));
    assert!(!stdout.contains("Found"));
}

#[test]
fn test_structure_problems_fail_with_paths() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "broken_structure");

    let output = marketing(&dir, &[feed.to_str().unwrap()]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains(
        "restaurants[0].marketing_extension.social_media_strategy.hashtags[0] [marketing.hashtag]"
    ));
    assert!(stdout.contains("dishes[0].chef_highlight.translations.english [dish.language_code]"));
    assert!(stdout.contains("dishes[0].farm_distance [dish.farm_distance]"));
    assert!(stdout.contains("bundles[0].included_items [bundle.items]"));
    assert!(stdout.contains("Marketing validation failed: 4 errors"));
}

#[test]
fn test_optional_rule_sets_are_off_by_default() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "weak_copy");

    let output = marketing(&dir, &[feed.to_str().unwrap()]);

    assert_eq!(exit_code(&output), 0, "stdout: {}", stdout_of(&output));
    assert!(!stdout_of(&output).contains("SEO Analysis:"));
}

#[test]
fn test_content_quality_flag_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "weak_copy");

    let output = marketing(&dir, &[feed.to_str().unwrap(), "--content-quality"]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains("dishes[0].chef_highlight.translations.en [content.punctuation]"));
    assert!(stdout.contains("1 warning"));
    assert!(!stdout.contains("seo.unused_keyword"));
}

#[test]
fn test_seo_flag_reports_unused_keywords() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "weak_copy");

    let output = marketing(&dir, &[feed.to_str().unwrap(), "--seo-check"]);
    let stdout = stdout_of(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(stdout.contains(
        "restaurants[0].key_message_points[0] [seo.unused_keyword]: Key term 'fresh local seafood daily' is not used in marketing text"
    ));
    assert!(stdout.contains("dishes[0].name [seo.unused_keyword]"));
    assert!(stdout.contains("Texts analyzed: 1"));
    assert!(!stdout.contains("content.punctuation"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "weak_copy");

    let output = marketing(
        &dir,
        &[feed.to_str().unwrap(), "--all-checks", "--format", "json"],
    );
    assert_eq!(exit_code(&output), 1);

    let body: Value = serde_json::from_str(&stdout_of(&output)).expect("stdout is JSON");
    assert_eq!(body["passed"], Value::Bool(false));
    assert_eq!(body["report"]["version"], "1.2");
    assert!(body.get("schema").is_none());

    let issues = body["report"]["issues"].as_array().unwrap();
    let rule_ids: Vec<&str> = issues
        .iter()
        .map(|i| i["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "content.punctuation",
            "seo.unused_keyword",
            "seo.unused_keyword"
        ]
    );
    assert_eq!(issues[0]["severity"], "WARNING");
    assert_eq!(issues[0]["rule_set"], "content");
    assert_eq!(issues[1]["rule_set"], "seo");
    assert_eq!(body["report"]["seo"]["texts_analyzed"], 1);
}

#[test]
fn test_parallel_run_matches_sequential_output() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "broken_structure");
    let feed = feed.to_str().unwrap();

    let sequential = marketing(&dir, &[feed, "--all-checks", "--format", "json"]);
    let parallel = marketing(&dir, &[feed, "--all-checks", "--format", "json", "-j", "4"]);

    assert_eq!(exit_code(&sequential), exit_code(&parallel));
    assert_eq!(stdout_of(&sequential), stdout_of(&parallel));
}

#[test]
fn test_schema_failure_fails_marketing_run() {
    let dir = TempDir::new().unwrap();
    let feed = dir.path().join("feed.json");
    fs::write(&feed, r#"{"header": {"version": 12}, "restaurants": []}"#).unwrap();
    let schema = fixture_path("feed_schema");

    let output = marketing(
        &dir,
        &[
            feed.to_str().unwrap(),
            "--schema",
            schema.to_str().unwrap(),
            "--format",
            "json",
        ],
    );
    assert_eq!(exit_code(&output), 1);

    let body: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(body["passed"], Value::Bool(false));
    assert_eq!(body["schema"]["is_valid"], Value::Bool(false));
    // the rule sets themselves report the bad version
    assert_eq!(body["report"]["issues"][0]["rule_id"], "header.version");
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();

    let output = marketing(&dir, &["does-not-exist.json"]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("could not read feed file does-not-exist.json"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_invalid_json_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.json"), "{ not json").unwrap();

    let output = marketing(&dir, &["feed.json"]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("is not valid JSON"));
}

#[test]
fn test_non_object_root_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feed.json"), "[1, 2, 3]").unwrap();

    let output = marketing(&dir, &["feed.json"]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("must be a JSON object, found array"));
}

#[test]
fn test_zero_jobs_rejected() {
    let dir = TempDir::new().unwrap();
    let feed = install_fixture(dir.path(), "valid_feed");

    let output = marketing(&dir, &[feed.to_str().unwrap(), "--jobs", "0"]);

    assert_eq!(exit_code(&output), 2);
    assert!(stderr_of(&output).contains("--jobs must be between 1 and 256"));
}

//! Realtime feed checks.
//!
//! Realtime feeds are normally protocol buffers; only their JSON rendition is
//! inspected structurally. Binary files get existence and size checks.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::feed::{load_json, LoadError, DEFAULT_VERSION};

/// Accepted `header.incrementality` values
pub const INCREMENTALITY: &[&str] = &["FULL_DATASET", "DIFFERENTIAL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeFormat {
    Json,
    Binary,
}

#[derive(Debug, Clone, Serialize)]
pub struct RealtimeReport {
    pub format: RealtimeFormat,
    pub passed: bool,
    /// Declared version; JSON feeds only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub size_bytes: u64,
    pub problems: Vec<String>,
}

/// Check a realtime feed file. The format is chosen by extension.
pub fn check_realtime_file(path: &Path) -> Result<RealtimeReport, LoadError> {
    let metadata = fs::metadata(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let size_bytes = metadata.len();

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if !is_json {
        tracing::warn!("protocol buffer decoding is not supported; checking file size only");
        let problems = if size_bytes == 0 {
            vec![format!("File is empty: {}", path.display())]
        } else {
            Vec::new()
        };
        return Ok(RealtimeReport {
            format: RealtimeFormat::Binary,
            passed: problems.is_empty(),
            version: None,
            size_bytes,
            problems,
        });
    }

    let document = load_json(path)?;
    let version = document
        .get("header")
        .and_then(|h| h.get("version"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION)
        .to_string();
    tracing::info!(%version, "detected realtime feed version");

    let problems = check_realtime_document(&document);
    Ok(RealtimeReport {
        format: RealtimeFormat::Json,
        passed: problems.is_empty(),
        version: Some(version),
        size_bytes,
        problems,
    })
}

/// Structural problems of a JSON realtime feed.
pub fn check_realtime_document(document: &Value) -> Vec<String> {
    let mut problems = Vec::new();

    for key in ["header", "entity"] {
        if document.get(key).is_none() {
            problems.push(format!("Realtime feed missing required '{}' field", key));
        }
    }

    let incrementality = document
        .get("header")
        .and_then(|h| h.get("incrementality"));
    match incrementality.and_then(Value::as_str) {
        Some(value) if INCREMENTALITY.contains(&value) => {}
        _ => problems.push(format!(
            "Invalid incrementality value: {} (expected one of {})",
            incrementality
                .map(Value::to_string)
                .unwrap_or_else(|| "none".to_string()),
            INCREMENTALITY.join(", ")
        )),
    }

    problems
}

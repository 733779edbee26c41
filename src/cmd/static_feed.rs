//! `orfs static`: JSON schema conformance of a static feed.

use anyhow::Result;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};

use orfs::config::Config;
use orfs::feed::{load_json, DEFAULT_VERSION};
use orfs::schema::validate_against_schema;

use crate::render;

/// Returns whether the feed conforms.
pub fn cmd_static(config: &Config, file: &Path, schema: Option<PathBuf>) -> Result<bool> {
    let schema_path = match schema.or_else(|| config.schema.clone()) {
        Some(path) => path,
        None => anyhow::bail!(
            "No schema configured. Pass --schema <PATH> or set `schema` in {}",
            orfs::config::PROJECT_CONFIG_FILE
        ),
    };

    let document = load_json(file)?;
    let version = document
        .get("header")
        .and_then(|h| h.get("version"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION);
    tracing::info!(version, "detected ORFS version");

    let result = validate_against_schema(&schema_path, &document)?;
    render::schema_result(&mut io::stdout().lock(), &super::origin(file), &result)?;
    Ok(result.is_valid)
}

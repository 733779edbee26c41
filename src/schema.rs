//! JSON Schema conformance for feed files.
//!
//! The schema check is a black box in front of the rule sets: it runs first,
//! and its verdict and error text are reported as-is.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Result of checking a document against a JSON schema
#[derive(Debug, Clone, Serialize)]
pub struct SchemaResult {
    /// Whether the document conforms
    pub is_valid: bool,
    /// Validator error text, one entry per violation
    pub errors: Vec<String>,
}

/// Load and compile a JSON schema from a file path
pub fn load_schema(schema_path: &Path) -> Result<jsonschema::Validator> {
    let schema_content = fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema file: {}", schema_path.display()))?;

    let schema: Value = serde_json::from_str(&schema_content)
        .with_context(|| format!("Failed to parse schema as JSON: {}", schema_path.display()))?;

    jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile JSON schema: {}", e))
}

/// Check a parsed document, collecting every violation.
pub fn check_document(validator: &jsonschema::Validator, document: &Value) -> SchemaResult {
    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("at '{}': {}", path, e)
            }
        })
        .collect();

    SchemaResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Load the schema at `schema_path` and check `document` against it.
pub fn validate_against_schema(schema_path: &Path, document: &Value) -> Result<SchemaResult> {
    let validator = load_schema(schema_path)?;
    let result = check_document(&validator, document);
    tracing::debug!(
        schema = %schema_path.display(),
        valid = result.is_valid,
        errors = result.errors.len(),
        "schema check"
    );
    Ok(result)
}

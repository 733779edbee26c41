//! Configuration for feed validation runs.
//!
//! Settings come from YAML files, merged in order (later overrides earlier):
//! 1. Global config (`~/.config/orfs/config.yaml`)
//! 2. Project config (`orfs.yaml` in the working directory, or `--config`)
//!
//! Command-line flags are applied on top by the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::validation::ValidateOptions;

pub mod defaults;
pub mod validation;

pub use defaults::*;
pub use validation::*;

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "orfs.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checks: ChecksConfig,
    /// JSON schema checked before the rule sets run
    #[serde(default)]
    pub schema: Option<PathBuf>,
    #[serde(default)]
    pub parallel: ParallelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration with full merge semantics from the default
    /// locations. Missing files are skipped.
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Some(Path::new(PROJECT_CONFIG_FILE)),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.schema = config.schema.map(|schema| resolve_relative(path, schema));
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse config YAML")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from specified global and project configs.
    /// Project config values override global config values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: Option<&Path>) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = project_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;
        Ok(config)
    }

    /// Rule-set switches and fan-out for [`crate::validation::validate`].
    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            content_quality: self.checks.content_quality,
            seo_check: self.checks.seo_check,
            jobs: self.parallel.jobs,
        }
    }
}

/// Returns the path to the global config file at ~/.config/orfs/config.yaml
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/orfs/config.yaml"))
}

/// Schema paths in a config file are relative to that file.
fn resolve_relative(config_path: &Path, schema: PathBuf) -> PathBuf {
    if schema.is_absolute() {
        return schema;
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(schema),
        _ => schema,
    }
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub checks: Option<PartialChecksConfig>,
    pub schema: Option<PathBuf>,
    pub parallel: Option<ParallelConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialChecksConfig {
    pub content_quality: Option<bool>,
    pub seo_check: Option<bool>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut partial = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        partial.schema = partial.schema.map(|schema| resolve_relative(path, schema));
        Ok(partial)
    }

    fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse config YAML")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_checks = self.checks.unwrap_or_default();
        let project_checks = project.checks.unwrap_or_default();

        Config {
            checks: ChecksConfig {
                // Project value > global value > default
                content_quality: project_checks
                    .content_quality
                    .or(global_checks.content_quality)
                    .unwrap_or_else(defaults::default_false),
                seo_check: project_checks
                    .seo_check
                    .or(global_checks.seo_check)
                    .unwrap_or_else(defaults::default_false),
            },
            schema: project.schema.or(self.schema),
            parallel: project.parallel.or(self.parallel).unwrap_or_default(),
            output: project.output.or(self.output).unwrap_or_default(),
        }
    }
}

//! Command handlers for the orfs CLI.

pub mod marketing;
pub mod realtime;
pub mod static_feed;

use anyhow::Result;
use std::path::Path;

use orfs::config::Config;

/// Validation passed
pub const EXIT_PASS: i32 = 0;
/// Validation ran and found problems
pub const EXIT_FAIL: i32 = 1;
/// The feed or configuration could not be loaded
pub const EXIT_ERROR: i32 = 2;

pub fn exit_code(passed: bool) -> i32 {
    if passed {
        EXIT_PASS
    } else {
        EXIT_FAIL
    }
}

/// An explicit `--config` file must exist; otherwise the default locations
/// are merged.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Display name for a feed path
pub fn origin(path: &Path) -> String {
    path.display().to_string()
}

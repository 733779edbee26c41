//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_jobs, usize, 1);
default_fn!(default_false, bool, false);
default_fn!(default_color, bool, true);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Optional rule sets, both off unless enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChecksConfig {
    /// Run text heuristics on narrative and marketing copy (default: false)
    #[serde(default = "default_false")]
    pub content_quality: bool,
    /// Run keyword coverage analysis (default: false)
    #[serde(default = "default_false")]
    pub seo_check: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            content_quality: default_false(),
            seo_check: default_false(),
        }
    }
}

/// Worker fan-out for per-entity rule passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParallelConfig {
    /// Scoped worker threads; 1 checks entities inline (default: 1)
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
        }
    }
}

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Glyph-prefixed human readable lines
    #[default]
    Text,
    /// The whole report as one JSON document
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Colourize text output when stdout is a terminal (default: true)
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

//! Validation logic for configuration values.

use anyhow::Result;

use super::defaults::ParallelConfig;
use super::Config;

/// Upper bound on worker threads for per-entity passes
pub const MAX_JOBS: usize = 256;

impl ParallelConfig {
    /// Validate parallel configuration
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            anyhow::bail!("parallel.jobs must be greater than 0");
        }
        if self.jobs > MAX_JOBS {
            anyhow::bail!(
                "parallel.jobs must be at most {}, got {}",
                MAX_JOBS,
                self.jobs
            );
        }

        Ok(())
    }
}

impl Config {
    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(schema) = &self.schema {
            if schema.as_os_str().is_empty() {
                anyhow::bail!("schema must be a path to a JSON schema file");
            }
        }

        self.parallel.validate()
    }
}

//! `orfs marketing`: rule-set validation of a static feed.

use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;

use orfs::config::{Config, OutputFormat, MAX_JOBS};
use orfs::feed::{load_json, Feed};
use orfs::schema::validate_against_schema;
use orfs::validation::{validate, ValidateOptions};

use crate::render;

/// Command-line switches of the marketing command
#[derive(Debug, Clone, Default)]
pub struct MarketingArgs {
    pub file: PathBuf,
    pub content_quality: bool,
    pub seo_check: bool,
    pub all_checks: bool,
    pub schema: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub jobs: Option<usize>,
}

/// Merge command-line switches over config values. Flags only ever enable
/// a rule set; `--jobs` replaces the configured value.
pub fn resolve_options(config: &Config, args: &MarketingArgs) -> Result<ValidateOptions> {
    let mut options = config.validate_options();
    if let Some(jobs) = args.jobs {
        if jobs == 0 || jobs > MAX_JOBS {
            anyhow::bail!("--jobs must be between 1 and {}, got {}", MAX_JOBS, jobs);
        }
        options.jobs = jobs;
    }
    options.content_quality |= args.content_quality || args.all_checks;
    options.seo_check |= args.seo_check || args.all_checks;
    Ok(options)
}

/// Returns whether the feed passed.
pub fn cmd_marketing(config: &Config, args: MarketingArgs) -> Result<bool> {
    let options = resolve_options(config, &args)?;
    let format = args.format.unwrap_or(config.output.format);
    let schema_path = args.schema.clone().or_else(|| config.schema.clone());
    let origin = super::origin(&args.file);

    let document = load_json(&args.file)?;
    let schema = schema_path
        .map(|path| validate_against_schema(&path, &document))
        .transpose()?;
    let feed = Feed::from_value(&document)
        .with_context(|| format!("Failed to load feed {}", origin))?;

    let report = validate(&feed, &options);
    let passed = report.passed && schema.as_ref().map_or(true, |s| s.is_valid);

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => render::json(
            &mut out,
            &render::MarketingJson {
                file: &origin,
                passed,
                schema: schema.as_ref(),
                report: &report,
            },
        )?,
        OutputFormat::Text => {
            render::feed_banner(&mut out, &origin, &feed)?;
            if let Some(schema) = &schema {
                render::schema_result(&mut out, &origin, schema)?;
            }
            render::marketing_report(&mut out, &origin, &report)?;
        }
    }

    Ok(passed)
}

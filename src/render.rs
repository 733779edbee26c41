//! Human and JSON rendering of validation results.
//!
//! Every renderer writes to a caller-supplied writer so output can be
//! captured in tests.

use std::io::{self, Write};

use chrono::DateTime;
use colored::Colorize;
use serde::Serialize;

use orfs::feed::Feed;
use orfs::issue::{Severity, ValidationIssue};
use orfs::realtime::{RealtimeFormat, RealtimeReport};
use orfs::rules::SeoReport;
use orfs::schema::SchemaResult;
use orfs::validation::ValidationReport;

const RULE_WIDTH: usize = 60;

/// JSON envelope for the `marketing` command
#[derive(Serialize)]
pub struct MarketingJson<'a> {
    pub file: &'a str,
    /// Overall verdict: rule sets and, when configured, the schema check
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<&'a SchemaResult>,
    pub report: &'a ValidationReport,
}

pub fn json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Version and header details of a loaded feed.
pub fn feed_banner(out: &mut impl Write, origin: &str, feed: &Feed) -> io::Result<()> {
    writeln!(
        out,
        "{} Validating {} (ORFS {})",
        "→".cyan(),
        origin,
        feed.version()
    )?;

    let header = match feed.header.get() {
        Some(h) => h,
        None => return Ok(()),
    };
    if let Some(provider) = header.provider.non_empty() {
        writeln!(out, "  Provider: {}", provider)?;
    }
    if let Some(generated) = header
        .timestamp
        .get()
        .and_then(|ts| DateTime::from_timestamp(*ts, 0))
    {
        writeln!(
            out,
            "  Generated: {}",
            generated.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }
    Ok(())
}

pub fn schema_result(out: &mut impl Write, origin: &str, result: &SchemaResult) -> io::Result<()> {
    if result.is_valid {
        writeln!(
            out,
            "{} {} is valid according to the JSON schema",
            "✓".green(),
            origin
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{} Schema validation failed with {} {}:",
        "✗".red(),
        result.errors.len(),
        plural(result.errors.len(), "error", "errors")
    )?;
    for error in &result.errors {
        writeln!(out, "  {} {}", "✗".red(), error)?;
    }
    Ok(())
}

pub fn realtime_report(
    out: &mut impl Write,
    origin: &str,
    report: &RealtimeReport,
) -> io::Result<()> {
    if !report.passed {
        for problem in &report.problems {
            writeln!(out, "{} {}", "✗".red(), problem)?;
        }
        return Ok(());
    }

    match report.format {
        RealtimeFormat::Json => writeln!(
            out,
            "{} Realtime feed (JSON format) at {} has valid structure",
            "✓".green(),
            origin
        ),
        RealtimeFormat::Binary => {
            writeln!(
                out,
                "{} Realtime feed at {} exists and is not empty ({} bytes)",
                "✓".green(),
                origin,
                report.size_bytes
            )?;
            writeln!(
                out,
                "  {} Protocol buffer contents were not decoded",
                "ℹ".blue()
            )
        }
    }
}

/// Issue list, SEO summary and verdict of a marketing validation run.
pub fn marketing_report(
    out: &mut impl Write,
    origin: &str,
    report: &ValidationReport,
) -> io::Result<()> {
    if !report.issues.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{} Found {} {} with marketing fields:",
            "✗".red(),
            report.issues.len(),
            plural(report.issues.len(), "issue", "issues")
        )?;
        for issue in &report.issues {
            issue_line(out, issue)?;
        }
    }

    if let Some(seo) = &report.seo {
        seo_summary(out, seo)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "━".repeat(RULE_WIDTH).cyan())?;
    if report.passed {
        writeln!(
            out,
            "{} Marketing fields in {} pass validation checks",
            "✓".green(),
            origin
        )?;
    } else {
        let errors = report.count(Severity::Error);
        let warnings = report.count(Severity::Warning);
        write!(out, "{} Marketing validation failed: ", "✗".red())?;
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{} {}", errors, plural(errors, "error", "errors")).red());
        }
        if warnings > 0 {
            parts.push(
                format!("{} {}", warnings, plural(warnings, "warning", "warnings")).yellow(),
            );
        }
        let parts: Vec<String> = parts.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", parts.join(", "))?;
    }
    writeln!(out, "{}", "━".repeat(RULE_WIDTH).cyan())
}

fn issue_line(out: &mut impl Write, issue: &ValidationIssue) -> io::Result<()> {
    let icon = match issue.severity() {
        Severity::Warning => "⚠".yellow(),
        Severity::Error => "✗".red(),
    };
    writeln!(
        out,
        "  {} {} [{}]: {}",
        icon,
        issue.path().as_str().cyan(),
        issue.rule_id(),
        issue.message()
    )
}

fn seo_summary(out: &mut impl Write, seo: &SeoReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "SEO Analysis:".bold())?;
    writeln!(out, "  Texts analyzed: {}", seo.texts_analyzed)?;

    let top: Vec<String> = seo
        .top_tokens
        .iter()
        .map(|t| format!("{} ({})", t.token, t.count))
        .collect();
    writeln!(out, "  Most frequent words: {}", or_none(&top))?;

    let usage: Vec<String> = seo
        .keyword_usage
        .iter()
        .map(|k| format!("{} ({})", k.keyword, k.count))
        .collect();
    writeln!(out, "  Key term usage: {}", or_none(&usage))
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

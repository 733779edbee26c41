//! Validation driver: runs the rule sets over a feed and merges their issues.
//!
//! Issues come out in a fixed order: structural, then content, then SEO, each
//! in document traversal order. Per-entity passes may run on several scoped
//! worker threads; results are tagged with the node ordinal and re-sorted, so
//! the report is identical whatever the job count.
//!
//! A panic inside a rule set is contained to the entity being checked and
//! reported as an `internal.analyzer_fault` issue. It never aborts the run.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::feed::{Feed, FieldPath, Node, MARKETING_VERSIONS};
use crate::issue::{RuleSet, Severity, ValidationIssue};
use crate::rules::{analyze_seo, content, structure, SeoAnalysis, SeoReport};

/// Per-node rule set entry point
pub type NodeCheck = fn(&Node<'_>) -> Vec<ValidationIssue>;

/// Which optional rule sets to run, and how wide to fan out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    pub content_quality: bool,
    pub seo_check: bool,
    /// Worker threads for per-entity passes; 1 runs inline
    pub jobs: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            content_quality: false,
            seo_check: false,
            jobs: 1,
        }
    }
}

impl ValidateOptions {
    /// Content quality and SEO both enabled
    pub fn all_checks() -> Self {
        Self {
            content_quality: true,
            seo_check: true,
            ..Self::default()
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Outcome of one validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// True iff `issues` is empty
    pub passed: bool,
    /// Declared feed version, or the default when absent
    pub version: String,
    pub issues: Vec<ValidationIssue>,
    /// Keyword diagnostics, present when the SEO pass ran to completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoReport>,
}

impl ValidationReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }
}

/// Validate a loaded feed.
pub fn validate(feed: &Feed, options: &ValidateOptions) -> ValidationReport {
    let version = feed.version();
    if MARKETING_VERSIONS.contains(&version) {
        debug!(version, "feed version");
    } else {
        warn!(
            version,
            "feed version does not declare marketing extensions; validating anyway"
        );
    }

    let nodes = feed.nodes();
    debug!(
        nodes = nodes.len(),
        jobs = options.jobs,
        content_quality = options.content_quality,
        seo_check = options.seo_check,
        "starting validation"
    );

    let mut issues = run_pass(&nodes, RuleSet::Structure, structure::check_node, options.jobs);

    if options.content_quality {
        issues.extend(run_pass(
            &nodes,
            RuleSet::Content,
            content::check_node,
            options.jobs,
        ));
    }

    let mut seo = None;
    if options.seo_check {
        let (seo_issues, report) = seo_pass(feed, analyze_seo);
        issues.extend(seo_issues);
        seo = report;
    }

    let passed = issues.is_empty();
    info!(passed, issues = issues.len(), "validation finished");

    ValidationReport {
        passed,
        version: version.to_string(),
        issues,
        seo,
    }
}

/// Whole-document SEO analysis. A fault yields one issue at `document` and
/// no report.
pub fn seo_pass(
    feed: &Feed,
    analyze: fn(&Feed) -> SeoAnalysis,
) -> (Vec<ValidationIssue>, Option<SeoReport>) {
    match isolate(|| analyze(feed)) {
        Ok(analysis) => (analysis.issues, Some(analysis.report)),
        Err(detail) => {
            warn!(%detail, "SEO analysis failed");
            let fault = ValidationIssue::analyzer_fault(
                RuleSet::Seo,
                FieldPath::root("document"),
                &detail,
            );
            (vec![fault], None)
        }
    }
}

/// Run one per-node check over every node, in traversal order.
pub fn run_pass(
    nodes: &[Node<'_>],
    rule_set: RuleSet,
    check: NodeCheck,
    jobs: usize,
) -> Vec<ValidationIssue> {
    let tagged: Vec<(usize, Vec<ValidationIssue>)> = if jobs <= 1 || nodes.len() < 2 {
        nodes
            .iter()
            .enumerate()
            .map(|(ordinal, node)| (ordinal, check_isolated(node, rule_set, check)))
            .collect()
    } else {
        fan_out(nodes, rule_set, check, jobs)
    };

    tagged.into_iter().flat_map(|(_, issues)| issues).collect()
}

/// Split nodes into contiguous chunks, one scoped worker per chunk.
fn fan_out(
    nodes: &[Node<'_>],
    rule_set: RuleSet,
    check: NodeCheck,
    jobs: usize,
) -> Vec<(usize, Vec<ValidationIssue>)> {
    let chunk_size = nodes.len().div_ceil(jobs);

    let mut tagged: Vec<(usize, Vec<ValidationIssue>)> = thread::scope(|scope| {
        let handles: Vec<_> = nodes
            .chunks(chunk_size)
            .enumerate()
            .map(|(c, chunk)| {
                let offset = c * chunk_size;
                let handle = scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, node)| (offset + i, check_isolated(node, rule_set, check)))
                        .collect::<Vec<_>>()
                });
                (offset, chunk, handle)
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(offset, chunk, handle)| match handle.join() {
                Ok(results) => results,
                Err(payload) => {
                    let detail = panic_message(payload.as_ref());
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, node)| {
                            let fault = ValidationIssue::analyzer_fault(
                                rule_set,
                                node.path.clone(),
                                &detail,
                            );
                            (offset + i, vec![fault])
                        })
                        .collect()
                }
            })
            .collect()
    });

    tagged.sort_by_key(|(ordinal, _)| *ordinal);
    tagged
}

fn check_isolated(node: &Node<'_>, rule_set: RuleSet, check: NodeCheck) -> Vec<ValidationIssue> {
    match isolate(|| check(node)) {
        Ok(issues) => issues,
        Err(detail) => {
            warn!(path = %node.path, %rule_set, %detail, "analyzer fault");
            vec![ValidationIssue::analyzer_fault(
                rule_set,
                node.path.clone(),
                &detail,
            )]
        }
    }
}

fn isolate<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

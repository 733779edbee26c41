//! Validation issues and the per-pass collector that accumulates them.
//!
//! Issues are value objects: once created they are never edited, and the
//! collector only ever appends.

use serde::Serialize;

use crate::feed::FieldPath;

/// Rule set that produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Shape, range and ordering checks
    Structure,
    /// Text heuristics on narrative and marketing copy
    Content,
    /// Keyword coverage across the whole document
    Seo,
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure => write!(f, "Structure"),
            Self::Content => write!(f, "Content"),
            Self::Seo => write!(f, "SEO"),
        }
    }
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Should be addressed but the data is usable
    Warning,
    /// Must be fixed
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Rule id attached to issues synthesized from a failing analyzer
pub const ANALYZER_FAULT: &str = "internal.analyzer_fault";

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    path: FieldPath,
    rule_id: String,
    severity: Severity,
    rule_set: RuleSet,
    message: String,
}

impl ValidationIssue {
    pub fn new(
        rule_set: RuleSet,
        severity: Severity,
        path: FieldPath,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            rule_id: rule_id.into(),
            severity,
            rule_set,
            message: message.into(),
        }
    }

    /// Issue standing in for an analyzer that failed on one entity.
    pub fn analyzer_fault(rule_set: RuleSet, path: FieldPath, detail: &str) -> Self {
        Self::new(
            rule_set,
            Severity::Error,
            path,
            ANALYZER_FAULT,
            format!("{} analysis failed for this entity: {}", rule_set, detail),
        )
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Append-only issue buffer for one rule set.
#[derive(Debug)]
pub struct IssueCollector {
    rule_set: RuleSet,
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            issues: Vec::new(),
        }
    }

    pub fn error(&mut self, path: &FieldPath, rule_id: &str, message: impl Into<String>) {
        self.push(Severity::Error, path, rule_id, message);
    }

    pub fn warning(&mut self, path: &FieldPath, rule_id: &str, message: impl Into<String>) {
        self.push(Severity::Warning, path, rule_id, message);
    }

    fn push(
        &mut self,
        severity: Severity,
        path: &FieldPath,
        rule_id: &str,
        message: impl Into<String>,
    ) {
        self.issues.push(ValidationIssue::new(
            self.rule_set,
            severity,
            path.clone(),
            rule_id,
            message,
        ));
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

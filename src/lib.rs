//! # ORFS feed validation
//!
//! Validates Open Restaurant Feed Specification documents: static JSON feeds
//! describing restaurants, dishes and bundles, together with their marketing
//! and narrative extensions.
//!
//! ## Overview
//!
//! A run loads a feed into a typed model, applies the structural rule set,
//! then optionally the content quality heuristics and the keyword (SEO)
//! analysis, and produces an ordered list of issues plus a pass/fail verdict.
//! Wrong-typed fields are findings, not load failures.
//!
//! ## Modules
//!
//! - [`feed`] - Document model and loading
//! - [`rules`] - Structural, content and SEO rule sets
//! - [`validation`] - Driver that runs and merges the rule sets
//! - [`issue`] - Issue, severity and collector types
//! - [`schema`] - JSON Schema conformance in front of the rule sets
//! - [`realtime`] - Realtime feed checks
//! - [`config`] - YAML configuration
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use orfs::feed::Feed;
//! use orfs::validation::{validate, ValidateOptions};
//!
//! let feed = Feed::load(Path::new("feed.json")).expect("Failed to load feed");
//! let report = validate(&feed, &ValidateOptions::all_checks());
//!
//! for issue in &report.issues {
//!     println!("{} {}: {}", issue.severity(), issue.path(), issue.message());
//! }
//! ```

pub mod config;
pub mod feed;
pub mod issue;
pub mod realtime;
pub mod rules;
pub mod schema;
pub mod validation;

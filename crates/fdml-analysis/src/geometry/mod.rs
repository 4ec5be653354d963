//! Geometry validation engine for FDML v1.2 documents.
//!
//! A document is read once into a `ValidationContext`; the default `RuleSet`
//! then runs over it in a fixed order. Documents whose `fdml` root is at any
//! other version, or whose root is not `fdml`, pass without checks. Per-file
//! failures become a trailing `geo_exception`.

pub mod context;
pub mod direction;
pub mod order;
pub mod relpos;
pub mod rules;
pub mod separation;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fdml_core::config::ScanConfig;
use fdml_core::constants::GEOMETRY_VERSION;
use fdml_core::errors::{ScanError, ValidationError};
use fdml_core::{Document, NodeQuery};

pub use context::ValidationContext;
pub use rules::{Rule, RuleSet};

use crate::issues::{FileResult, Issue, IssueCode};
use crate::scanner;

static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(RuleSet::new);

fn exception_issue(err: &ValidationError) -> Issue {
    Issue::new(
        IssueCode::GeoException,
        format!("Geometry validator exception: {err}"),
    )
}

/// Run the rule set over a parsed document root. Issues found before an
/// internal failure are returned alongside it.
pub fn check_root<N: NodeQuery>(root: &N, rules: &RuleSet) -> (Vec<Issue>, Option<ValidationError>) {
    let mut issues = Vec::new();
    if root.tag() != "fdml" || root.attr_trimmed("version") != GEOMETRY_VERSION {
        return (issues, None);
    }
    let ctx = ValidationContext::from_root(root);
    let failure = rules.run(&ctx, &mut issues).err();
    (issues, failure)
}

/// Validate a parsed document with the default rules. Internal failures are
/// appended as `geo_exception`.
pub fn validate_document(doc: &Document) -> Vec<Issue> {
    let (mut issues, failure) = check_root(doc.root(), &DEFAULT_RULES);
    if let Some(err) = failure {
        issues.push(exception_issue(&err));
    }
    issues
}

/// Load and validate one file.
pub fn validate_one(path: &Path) -> FileResult {
    let issues = match Document::load(path) {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "document could not be read for geometry checks");
            vec![exception_issue(&ValidationError::from(e))]
        }
    };
    tracing::debug!(file = %path.display(), issues = issues.len(), "geometry validated");
    FileResult::new(path, issues)
}

/// Expand `inputs` and validate every document, in input order.
pub fn validate_collect(inputs: &[PathBuf], scan: &ScanConfig) -> Result<Vec<FileResult>, ScanError> {
    let files = scanner::expand_inputs(inputs, scan)?;
    scanner::run_parallel(&files, scan, validate_one)
}

/// Whether every result passed.
pub fn all_ok(results: &[FileResult]) -> bool {
    results.iter().all(|r| r.ok)
}

//! Per-figure beat totals checked against the document meter.

use std::path::{Path, PathBuf};

use fdml_core::config::ScanConfig;
use fdml_core::constants::NO_FIGURE_ID;
use fdml_core::errors::ScanError;
use fdml_core::{Document, NodeQuery};

use super::meter::{parse_meter, parse_positive_int, Meter};
use crate::issues::{FileResult, Issue, IssueCode};
use crate::scanner;

/// `./step | ./measureRange/step` in document order.
fn figure_steps<N: NodeQuery>(figure: &N) -> Vec<&N> {
    let mut steps = Vec::new();
    for child in figure.children() {
        match child.tag() {
            "step" => steps.push(child),
            "measureRange" => steps.extend(child.children().iter().filter(|c| c.tag() == "step")),
            _ => {}
        }
    }
    steps
}

fn check_figure<N: NodeQuery>(figure: &N, meter: &Meter, issues: &mut Vec<Issue>) {
    let figure_id = match figure.attr_trimmed("id") {
        "" => NO_FIGURE_ID,
        id => id,
    };

    let mut beats = Vec::new();
    let mut bad_step = false;
    for step in figure_steps(figure) {
        let raw = step.attr_or_empty("beats");
        match parse_positive_int(raw) {
            Some(b) => beats.push(b),
            None => {
                issues.push(Issue::in_figure(
                    IssueCode::BadStepBeats,
                    figure_id,
                    format!("step/@beats must be a positive integer (found '{raw}')"),
                ));
                bad_step = true;
            }
        }
    }
    if bad_step {
        return;
    }

    let total: u64 = beats.iter().map(|b| u64::from(*b)).sum();
    if !meter.aligns_to_bar_length(total) {
        issues.push(Issue::in_figure(
            IssueCode::OffMeterFigure,
            figure_id,
            format!(
                "figure total beats {total} do not align to bar length {} of meter {}",
                meter.bar_length_counts, meter.raw
            ),
        ));
        return;
    }

    if meter.additive && !meter.aligns_to_additive_pattern(&beats) {
        issues.push(Issue::in_figure(
            IssueCode::OffMeterFigure,
            figure_id,
            format!(
                "step boundaries ({total} beats) do not align with additive group boundaries of meter {}",
                meter.raw
            ),
        ));
    }
}

/// Timing issues for a parsed document root. Applies to every version.
pub fn check_root<N: NodeQuery>(root: &N) -> Vec<Issue> {
    let mut issues = Vec::new();

    let raw = root
        .select_first("meta/meter")
        .map(|m| m.attr_or_empty("value").split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if raw.is_empty() {
        issues.push(Issue::new(IssueCode::MissingMeter, "meta/meter/@value is missing"));
        return issues;
    }

    let meter = match parse_meter(&raw) {
        Ok(meter) => meter,
        Err(e) => {
            issues.push(Issue::new(
                IssueCode::BadMeterFormat,
                format!("meter '{raw}' must be N/D or additive A+B+.../D: {e}"),
            ));
            return issues;
        }
    };

    for body in root.select("body") {
        for figure in body.descendants("figure") {
            check_figure(figure, &meter, &mut issues);
        }
    }
    issues
}

/// Timing issues for a parsed document.
pub fn validate_document(doc: &Document) -> Vec<Issue> {
    check_root(doc.root())
}

/// Load and check one file. Unreadable or malformed files report
/// `bad_meter_format` with the parse error.
pub fn validate_one(path: &Path) -> FileResult {
    let issues = match Document::load(path) {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "document could not be read for timing checks");
            vec![Issue::new(
                IssueCode::BadMeterFormat,
                format!("XML parse error: {e}"),
            )]
        }
    };
    tracing::debug!(file = %path.display(), issues = issues.len(), "timing validated");
    FileResult::new(path, issues)
}

/// Expand `inputs` and check every document, in input order.
pub fn validate_collect(inputs: &[PathBuf], scan: &ScanConfig) -> Result<Vec<FileResult>, ScanError> {
    let files = scanner::expand_inputs(inputs, scan)?;
    scanner::run_parallel(&files, scan, validate_one)
}

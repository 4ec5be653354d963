//! Combined geometry + timing check over a batch of inputs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fdml_core::errors::{ScanError, ValidationError};
use fdml_core::{Document, FdmlConfig};
use serde::Serialize;

use crate::issues::{FileResult, Issue, IssueCode};
use crate::{geometry, guidance, scanner, timing};

/// Results of every enabled engine, each in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<FileResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Vec<FileResult>>,
}

impl CheckReport {
    fn all_results(&self) -> impl Iterator<Item = &FileResult> {
        self.geometry
            .iter()
            .flatten()
            .chain(self.timing.iter().flatten())
    }

    /// True iff every file result of every enabled engine is ok.
    pub fn passed(&self) -> bool {
        self.all_results().all(|r| r.ok)
    }

    /// Number of files checked.
    pub fn file_count(&self) -> usize {
        self.geometry
            .as_ref()
            .or(self.timing.as_ref())
            .map_or(0, Vec::len)
    }

    pub fn issue_count(&self) -> usize {
        self.all_results().map(|r| r.issues.len()).sum()
    }

    /// Guidance for every code seen by any engine.
    pub fn explain(&self) -> BTreeMap<IssueCode, &'static str> {
        guidance::explain(self.all_results())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn check_file(path: &Path, geometry_on: bool, timing_on: bool) -> (Option<FileResult>, Option<FileResult>) {
    match Document::load(path) {
        Ok(doc) => (
            geometry_on.then(|| FileResult::new(path, geometry::validate_document(&doc))),
            timing_on.then(|| FileResult::new(path, timing::validate_document(&doc))),
        ),
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "document could not be read");
            let parse_message = format!("XML parse error: {e}");
            let geo_message = format!("Geometry validator exception: {}", ValidationError::from(e));
            let geo = geometry_on.then(|| {
                FileResult::new(path, vec![Issue::new(IssueCode::GeoException, geo_message)])
            });
            let tim = timing_on.then(|| {
                FileResult::new(path, vec![Issue::new(IssueCode::BadMeterFormat, parse_message)])
            });
            (geo, tim)
        }
    }
}

/// Run the engines enabled in `config` over `inputs`. Each file is parsed once.
pub fn check_paths(inputs: &[PathBuf], config: &FdmlConfig) -> Result<CheckReport, ScanError> {
    let geometry_on = config.validation.effective_geometry();
    let timing_on = config.validation.effective_timing();

    let files = scanner::expand_inputs(inputs, &config.scan)?;
    let pairs = scanner::run_parallel(&files, &config.scan, |path| {
        check_file(path, geometry_on, timing_on)
    })?;
    let (geo, tim): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();

    let report = CheckReport {
        geometry: geometry_on.then(|| geo.into_iter().flatten().collect()),
        timing: timing_on.then(|| tim.into_iter().flatten().collect()),
    };
    tracing::info!(
        files = report.file_count(),
        issues = report.issue_count(),
        passed = report.passed(),
        "check complete"
    );
    Ok(report)
}

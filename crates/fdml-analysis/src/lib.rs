//! fdml-analysis: semantic validation engines for FDML documents.
//!
//! - `geometry`: formation-aware rule set over the document-ordered primitive stream
//! - `timing`: meter parsing and per-figure beat alignment
//! - `scanner`: batch input expansion and the parallel per-file driver
//! - `guidance`: remediation text per issue code
//! - `check`: both engines over one batch, with pass/fail aggregation

pub mod check;
pub mod geometry;
pub mod guidance;
pub mod issues;
pub mod scanner;
pub mod timing;

pub use check::{check_paths, CheckReport};
pub use issues::{FileResult, Issue, IssueCode};

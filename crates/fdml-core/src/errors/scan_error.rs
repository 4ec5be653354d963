//! Input expansion errors.

use std::path::PathBuf;

use super::error_code::{self, FdmlErrorCode};

/// Errors raised while expanding batch inputs into document paths.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Cannot walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Cannot build validation thread pool: {0}")]
    ThreadPool(String),
}

impl FdmlErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}

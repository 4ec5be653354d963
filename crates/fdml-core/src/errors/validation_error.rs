//! Per-file validation failures.

use super::error_code::{self, FdmlErrorCode};
use super::{ConfigError, DocumentError, ScanError};

/// A failure that stops evaluation of a single file.
/// The batch layer converts it into an issue; it never aborts a batch.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal evaluation failure: {0}")]
    Internal(String),
}

impl FdmlErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Document(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Internal(_) => error_code::VALIDATION_ERROR,
        }
    }
}

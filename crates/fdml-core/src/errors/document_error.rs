//! Document loading and parsing errors.

use std::path::PathBuf;

use super::error_code::{self, FdmlErrorCode};

/// Errors that can occur while turning a file into a `Document`.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("Unclosed element <{0}> at end of input")]
    Unclosed(String),

    #[error("Document has no root element")]
    Empty,

    #[error("Content after the root element: <{0}>")]
    TrailingElement(String),
}

impl FdmlErrorCode for DocumentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::DOCUMENT_IO,
            Self::Syntax { .. } => error_code::DOCUMENT_SYNTAX,
            _ => error_code::DOCUMENT_STRUCTURE,
        }
    }
}

//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_THREADS};

/// Configuration for expanding batch inputs into document files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as documents. Default: xml, fdml.
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking directories. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Number of validation threads (0 = auto-detect). Default: 0.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective extension list, falling back to the defaults.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    /// Returns whether symlinks are followed, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    /// Whether `file_name` carries one of the document extensions.
    pub fn is_document_name(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.effective_extensions()
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

//! Engine selection.

use serde::{Deserialize, Serialize};

/// Which engines a batch check runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run the geometry engine. Default: true.
    pub geometry: Option<bool>,
    /// Run the timing engine. Default: true.
    pub timing: Option<bool>,
}

impl ValidationConfig {
    pub fn effective_geometry(&self) -> bool {
        self.geometry.unwrap_or(true)
    }

    pub fn effective_timing(&self) -> bool {
        self.timing.unwrap_or(true)
    }
}

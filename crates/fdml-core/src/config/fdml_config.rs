//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScanConfig, ValidationConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FDML_*`)
/// 3. Project config (`fdml.toml` in project root)
/// 4. User config (`~/.fdml/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FdmlConfig {
    pub scan: ScanConfig,
    pub validation: ValidationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_threads: Option<usize>,
    pub scan_follow_symlinks: Option<bool>,
    pub validation_geometry: Option<bool>,
    pub validation_timing: Option<bool>,
}

impl FdmlConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FdmlConfig) -> Result<(), ConfigError> {
        if config
            .scan
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "scan.extensions".to_string(),
                message: "extensions must be non-empty".to_string(),
            });
        }
        if !config.validation.effective_geometry() && !config.validation.effective_timing() {
            return Err(ConfigError::ValidationFailed {
                field: "validation".to_string(),
                message: "at least one of geometry or timing must be enabled".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.fdml/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".fdml").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FdmlConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FdmlConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it carries a value.
    fn merge(base: &mut FdmlConfig, other: &FdmlConfig) {
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }

        if other.validation.geometry.is_some() {
            base.validation.geometry = other.validation.geometry;
        }
        if other.validation.timing.is_some() {
            base.validation.timing = other.validation.timing;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FDML_SCAN_THREADS`, `FDML_VALIDATION_TIMING`, etc.
    fn apply_env_overrides(config: &mut FdmlConfig) {
        if let Ok(val) = std::env::var("FDML_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FDML_SCAN_FOLLOW_SYMLINKS") {
            if let Ok(v) = val.parse::<bool>() {
                config.scan.follow_symlinks = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FDML_VALIDATION_GEOMETRY") {
            if let Ok(v) = val.parse::<bool>() {
                config.validation.geometry = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FDML_VALIDATION_TIMING") {
            if let Ok(v) = val.parse::<bool>() {
                config.validation.timing = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FdmlConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.scan_follow_symlinks {
            config.scan.follow_symlinks = Some(v);
        }
        if let Some(v) = cli.validation_geometry {
            config.validation.geometry = Some(v);
        }
        if let Some(v) = cli.validation_timing {
            config.validation.timing = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

//! Shared constants for the FDML validation engines.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Documents at any other `fdml/@version` skip geometry validation.
pub const GEOMETRY_VERSION: &str = "1.2";

/// File extensions treated as FDML documents when expanding directories.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["xml", "fdml"];

/// Default number of validation threads (0 = rayon default).
pub const DEFAULT_THREADS: usize = 0;

/// Placeholder used in timing issues for figures without `@id`.
pub const NO_FIGURE_ID: &str = "(no-id)";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "FDML_LOG";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "fdml.toml";

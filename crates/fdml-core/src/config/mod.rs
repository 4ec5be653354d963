//! Configuration system for the FDML engines.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod fdml_config;
pub mod scan_config;
pub mod validation_config;

pub use fdml_config::{CliOverrides, FdmlConfig};
pub use scan_config::ScanConfig;
pub use validation_config::ValidationConfig;

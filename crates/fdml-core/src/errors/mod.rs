//! Error handling for the FDML engines.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod document_error;
pub mod error_code;
pub mod meter_error;
pub mod scan_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use document_error::DocumentError;
pub use error_code::FdmlErrorCode;
pub use meter_error::MeterError;
pub use scan_error::ScanError;
pub use validation_error::ValidationError;

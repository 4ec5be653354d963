//! FdmlErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable code
/// next to its human-readable `Display` message.
pub trait FdmlErrorCode {
    /// Returns the error code string (e.g., "DOCUMENT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DOCUMENT_IO: &str = "DOCUMENT_IO";
pub const DOCUMENT_SYNTAX: &str = "DOCUMENT_SYNTAX";
pub const DOCUMENT_STRUCTURE: &str = "DOCUMENT_STRUCTURE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const METER_ERROR: &str = "METER_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

//! Meter expression errors.

use super::error_code::{self, FdmlErrorCode};

/// Reasons a meter expression such as `2+2+2+3/16` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeterError {
    #[error("meter is empty")]
    Empty,

    #[error("meter '{0}' must contain exactly one '/'")]
    Slash(String),

    #[error("meter component '{0}' is not a positive integer")]
    Component(String),
}

impl FdmlErrorCode for MeterError {
    fn error_code(&self) -> &'static str {
        error_code::METER_ERROR
    }
}

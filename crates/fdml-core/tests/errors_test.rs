//! Tests for the error enums.

use std::path::PathBuf;

use fdml_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let document = DocumentError::Empty;
    assert_eq!(document.error_code(), "DOCUMENT_STRUCTURE");

    let io = DocumentError::Io {
        path: PathBuf::from("/nope.fdml.xml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert_eq!(io.error_code(), "DOCUMENT_IO");

    let config = ConfigError::FileNotFound { path: "/tmp".into() };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let scan = ScanError::ThreadPool("boom".into());
    assert_eq!(scan.error_code(), "SCAN_ERROR");

    let meter = MeterError::Empty;
    assert_eq!(meter.error_code(), "METER_ERROR");

    let internal = ValidationError::Internal("x".into());
    assert_eq!(internal.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_from_conversions_keep_inner_code() {
    let err: ValidationError = DocumentError::Syntax {
        position: 12,
        message: "bad".into(),
    }
    .into();
    assert!(matches!(err, ValidationError::Document(DocumentError::Syntax { .. })));
    assert_eq!(err.error_code(), "DOCUMENT_SYNTAX");

    let err: ValidationError = ScanError::Walk {
        path: PathBuf::from("corpus"),
        message: "denied".into(),
    }
    .into();
    assert_eq!(err.error_code(), "SCAN_ERROR");
}

#[test]
fn test_tagged_string_format() {
    let err = MeterError::Slash("3-4".into());
    assert_eq!(
        err.tagged_string(),
        "[METER_ERROR] meter '3-4' must contain exactly one '/'"
    );
}

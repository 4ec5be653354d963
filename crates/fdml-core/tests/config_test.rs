//! Tests for the configuration system.

use std::sync::Mutex;

use fdml_core::config::{CliOverrides, FdmlConfig};
use fdml_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all FDML_ env vars to prevent cross-test contamination.
fn clear_fdml_env_vars() {
    for key in [
        "FDML_SCAN_THREADS",
        "FDML_SCAN_FOLLOW_SYMLINKS",
        "FDML_VALIDATION_GEOMETRY",
        "FDML_VALIDATION_TIMING",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fdml_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("fdml.toml"),
        r#"
[scan]
threads = 2
extensions = ["xml"]

[validation]
timing = false
"#,
    )
    .unwrap();

    std::env::set_var("FDML_SCAN_THREADS", "4");

    let cli = CliOverrides {
        validation_timing: Some(true),
        ..Default::default()
    };
    let config = FdmlConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project for timing, env beats project for threads.
    assert!(config.validation.effective_timing());
    assert_eq!(config.scan.threads, Some(4));
    assert_eq!(config.scan.effective_extensions(), vec!["xml".to_string()]);

    clear_fdml_env_vars();
}

#[test]
fn test_missing_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fdml_env_vars();

    let dir = tempdir();
    let config = FdmlConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.effective_threads(), 0);
    assert!(!config.scan.effective_follow_symlinks());
    assert!(config.validation.effective_geometry());
    assert!(config.validation.effective_timing());
    assert_eq!(
        config.scan.effective_extensions(),
        vec!["xml".to_string(), "fdml".to_string()]
    );
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fdml_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("fdml.toml"), "this is not toml {{{{").unwrap();

    match FdmlConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[test]
fn test_all_engines_disabled_fails_validation() {
    let result = FdmlConfig::from_toml(
        r#"
[validation]
geometry = false
timing = false
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "validation"),
        other => panic!("Expected ValidationFailed, got: {other:?}"),
    }
}

#[test]
fn test_blank_extension_fails_validation() {
    let result = FdmlConfig::from_toml("[scan]\nextensions = [\"xml\", \".\"]\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = FdmlConfig::from_toml("[scan]\nthreads = 3\nflavour = \"vanilla\"\n").unwrap();
    assert_eq!(config.scan.effective_threads(), 3);
}

#[test]
fn test_extension_matching_is_case_insensitive() {
    let config = FdmlConfig::from_toml("[scan]\nextensions = [\".FDML\"]\n").unwrap();
    assert!(config.scan.is_document_name("dance.v12.fdml"));
    assert!(config.scan.is_document_name("DANCE.FDML"));
    assert!(!config.scan.is_document_name("dance.xml"));
}

#[test]
fn test_toml_round_trip() {
    let config = FdmlConfig::from_toml("[scan]\nthreads = 8\n").unwrap();
    let text = config.to_toml().unwrap();
    let back = FdmlConfig::from_toml(&text).unwrap();
    assert_eq!(back.scan.threads, Some(8));
}

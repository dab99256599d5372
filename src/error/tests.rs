//! Error type tests
//!
//! Tests for `GitopsiError` and its conversions.

#![allow(clippy::expect_used)]

use crate::error::GitopsiError;
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = GitopsiError::PatternNotFound {
        name: "monitoring".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Pattern 'monitoring' not found in any registry"
    );
}

#[test]
fn test_error_code() {
    let err = GitopsiError::NotInstalled {
        name: "monitoring".to_string(),
    };
    assert_eq!(
        err.code()
            .map(|c: Box<dyn std::fmt::Display>| c.to_string()),
        Some("gitopsi::pattern::not_installed".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GitopsiError = io_err.into();
    assert!(matches!(err, GitopsiError::IoError { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let yaml_err = parse_result.expect_err("YAML parsing should have failed");
    let err: GitopsiError = yaml_err.into();
    assert!(matches!(err, GitopsiError::ConfigParseFailed { .. }));
}

#[test]
fn test_json_error_conversion() {
    let parse_result: std::result::Result<serde_json::Value, _> =
        serde_json::from_str("invalid json content");
    let json_err = parse_result.expect_err("JSON parsing should have failed");
    let err: GitopsiError = json_err.into();
    assert!(matches!(err, GitopsiError::ConfigParseFailed { .. }));
}

test_error_contains!(
    test_cycle_detected_error,
    GitopsiError::CycleDetected {
        chain: "a -> b -> a".to_string()
    },
    "Circular dependency",
    "a -> b -> a"
);

test_error_contains!(
    test_dependency_failed_error,
    GitopsiError::DependencyFailed {
        name: "app".to_string(),
        dependency: "cert-manager".to_string(),
        reason: "not found".to_string(),
    },
    "cert-manager",
    "app",
    "not found"
);

test_error_contains!(
    test_validation_failed_error,
    GitopsiError::ValidationFailed {
        name: "monitoring".to_string(),
        message: "'replicas' expects integer".to_string(),
    },
    "Configuration for 'monitoring' is invalid",
    "replicas"
);

test_error_contains!(
    test_incompatible_error,
    GitopsiError::Incompatible {
        name: "routes".to_string(),
        reason: "platform 'kubernetes' not in [openshift]".to_string(),
    },
    "not compatible",
    "openshift"
);

test_error_contains!(
    test_file_remove_failed_error,
    GitopsiError::FileRemoveFailed {
        path: "base/app.yaml".to_string(),
        reason: "permission denied".to_string(),
    },
    "Failed to remove file",
    "base/app.yaml"
);

test_error_contains!(
    test_state_parse_failed_error,
    GitopsiError::StateParseFailed {
        path: ".gitopsi/patterns.yaml".to_string(),
        reason: "bad indentation".to_string(),
    },
    "pattern ledger",
    "bad indentation"
);

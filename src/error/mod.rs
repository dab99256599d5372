//! Error types and handling for gitopsi
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! There is no conflict variant: namespace and component-name collisions are
//! reported as data by the installer.

use miette::Diagnostic;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for gitopsi operations
#[derive(Error, Diagnostic, Debug)]
pub enum GitopsiError {
    // Pattern errors
    #[error("Pattern '{name}' not found in any registry")]
    #[diagnostic(
        code(gitopsi::pattern::not_found),
        help("Run 'gitopsi search' to list the patterns your registries provide")
    )]
    PatternNotFound { name: String },

    #[error("Pattern '{name}' has no version '{version}'")]
    #[diagnostic(code(gitopsi::pattern::version_not_found))]
    VersionNotFound { name: String, version: String },

    #[error("Pattern '{name}' is not installed")]
    #[diagnostic(
        code(gitopsi::pattern::not_installed),
        help("Run 'gitopsi list' to see installed patterns")
    )]
    NotInstalled { name: String },

    #[error("Invalid pattern definition: {message}")]
    #[diagnostic(code(gitopsi::pattern::invalid))]
    PatternInvalid { message: String },

    #[error("Pattern '{name}' would overwrite '{path}', which belongs to pattern '{owner}'")]
    #[diagnostic(
        code(gitopsi::pattern::path_conflict),
        help("Choose another environment name or uninstall '{owner}' first")
    )]
    PathConflict {
        name: String,
        path: String,
        owner: String,
    },

    #[error("Pattern '{name}' is not compatible: {reason}")]
    #[diagnostic(code(gitopsi::pattern::incompatible))]
    Incompatible { name: String, reason: String },

    // Configuration errors
    #[error("Configuration for '{name}' is invalid: {message}")]
    #[diagnostic(
        code(gitopsi::config::validation_failed),
        help("Check the keys and types declared under spec.config in pattern.yaml")
    )]
    ValidationFailed { name: String, message: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(gitopsi::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Dependency errors
    #[error("Required dependency '{dependency}' of '{name}' failed: {reason}")]
    #[diagnostic(code(gitopsi::deps::failed))]
    DependencyFailed {
        name: String,
        dependency: String,
        reason: String,
    },

    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(
        code(gitopsi::deps::circular),
        help("Remove the circular dependency from the pattern definitions")
    )]
    CycleDetected { chain: String },

    // Registry errors
    #[error("Registry '{registry}' failed: {reason}")]
    #[diagnostic(code(gitopsi::registry::failed))]
    RegistryFailed { registry: String, reason: String },

    // State errors
    #[error("Failed to parse pattern ledger: {path}: {reason}")]
    #[diagnostic(
        code(gitopsi::state::parse_failed),
        help("The ledger is plain YAML; fix or remove it to start from an empty ledger")
    )]
    StateParseFailed { path: String, reason: String },

    #[error("Failed to lock {path}: {reason}")]
    #[diagnostic(code(gitopsi::state::lock_failed))]
    LockFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(gitopsi::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(gitopsi::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove file: {path}: {reason}")]
    #[diagnostic(
        code(gitopsi::fs::remove_failed),
        help("Re-run with --force to ignore removal errors")
    )]
    FileRemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gitopsi::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for GitopsiError {
    fn from(err: std::io::Error) -> Self {
        GitopsiError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for GitopsiError {
    fn from(err: serde_yaml::Error) -> Self {
        GitopsiError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GitopsiError {
    fn from(err: serde_json::Error) -> Self {
        GitopsiError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for GitopsiError {
    fn from(err: inquire::InquireError) -> Self {
        GitopsiError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GitopsiError>;

pub(crate) fn read_error(path: &std::path::Path, e: &std::io::Error) -> GitopsiError {
    GitopsiError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

pub(crate) fn write_error(path: &std::path::Path, e: &std::io::Error) -> GitopsiError {
    GitopsiError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

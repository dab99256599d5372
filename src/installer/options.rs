//! Options and results of installer operations

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pattern::ConfigMap;

/// Environment generated when none is requested
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Configuration options for install
#[derive(Debug, Clone, PartialEq)]
pub struct InstallOptions {
    /// Exact version; empty means latest
    pub version: String,

    /// Typed configuration overlay
    pub config: ConfigMap,

    /// Raw `key=value` overrides, typed against the fetched pattern's schema
    pub overrides: Vec<String>,

    pub environments: Vec<String>,
    pub dry_run: bool,
    pub force: bool,
    pub skip_deps: bool,
    pub auto_approve: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            version: String::new(),
            config: ConfigMap::new(),
            overrides: Vec::new(),
            environments: vec![DEFAULT_ENVIRONMENT.to_string()],
            dry_run: false,
            force: false,
            skip_deps: false,
            auto_approve: false,
        }
    }
}

impl InstallOptions {
    /// Options a dependency is installed with
    pub(crate) fn for_dependency(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            environments: self.environments.clone(),
            dry_run: self.dry_run,
            auto_approve: self.auto_approve,
            ..Self::default()
        }
    }
}

/// Configuration options for uninstall
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallOptions {
    /// Drop the ledger entry but leave generated files in place
    pub keep_files: bool,
    /// Keep going when a file cannot be removed
    pub force: bool,
    pub auto_approve: bool,
}

/// Configuration options for update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Target version; empty means the registry's latest
    pub version: String,
    pub force: bool,
    pub dry_run: bool,
    pub auto_approve: bool,
}

/// Outcome of installing one dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Installed,
    Skipped,
    Failed,
    /// Would be installed (dry run)
    Planned,
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DependencyStatus::Installed => "installed",
            DependencyStatus::Skipped => "skipped",
            DependencyStatus::Failed => "failed",
            DependencyStatus::Planned => "planned",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyResult {
    pub name: String,
    pub version: String,
    pub status: DependencyStatus,
    pub message: String,
}

/// Result of an install or update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResult {
    pub success: bool,
    pub message: String,
    pub version: String,
    /// Files generated (or planned, in a dry run) for this pattern only
    pub generated_paths: Vec<String>,
    pub dependencies: Vec<DependencyResult>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Result of an uninstall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallResult {
    /// Files actually removed
    pub removed: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Degraded,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Health::Healthy => f.write_str("healthy"),
            Health::Degraded => f.write_str("degraded"),
        }
    }
}

/// On-disk health of an installed pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStatus {
    pub name: String,
    pub version: String,
    pub health: Health,
    pub installed_at: DateTime<Utc>,
    pub environments: Vec<String>,
    pub paths: Vec<String>,
    /// Recorded paths that no longer exist
    pub missing: Vec<String>,
}

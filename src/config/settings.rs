//! Project settings (.gitopsi/config.yaml)
//!
//! ```yaml
//! platform: kubernetes
//! gitopsTool: argocd
//! repoUrl: https://github.com/acme/platform-gitops.git
//! registries:
//!   - name: team
//!     path: ../platform-patterns
//! ```
//!
//! Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GitopsiError, Result, read_error};

/// Settings file name inside `.gitopsi/`
pub const SETTINGS_FILE: &str = "config.yaml";

/// Name of the registry supplied on the command line
pub const CLI_REGISTRY_NAME: &str = "cli";

/// GitOps tool that consumes the generated applications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitOpsTool {
    #[default]
    Argocd,
    Flux,
}

impl GitOpsTool {
    /// Top-level directory of the tool's application manifests
    pub fn dir_name(self) -> &'static str {
        match self {
            GitOpsTool::Argocd => "argocd",
            GitOpsTool::Flux => "flux",
        }
    }
}

impl std::fmt::Display for GitOpsTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A configured pattern registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySource {
    pub name: String,
    /// Directory; relative paths are resolved against the project root
    pub path: PathBuf,
}

fn default_platform() -> String {
    "kubernetes".to_string()
}

/// Project settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default)]
    pub gitops_tool: GitOpsTool,

    /// Git URL the GitOps tool syncs the generated manifests from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo_url: String,

    #[serde(default)]
    pub registries: Vec<RegistrySource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            gitops_tool: GitOpsTool::default(),
            repo_url: String::new(),
            registries: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a `.gitopsi` directory
    pub fn load(gitopsi_dir: &Path) -> Result<Self> {
        let path = gitopsi_dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| read_error(&path, &e))?;
        serde_yaml::from_str(&content).map_err(|e| GitopsiError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Registries to search, in order.
    ///
    /// A registry given on the command line comes first. With nothing
    /// configured the user registry `~/.gitopsi/patterns` is used.
    pub fn resolved_registries(
        &self,
        project_root: &Path,
        cli_registry: Option<&Path>,
    ) -> Vec<RegistrySource> {
        let mut sources: Vec<RegistrySource> = cli_registry
            .map(|path| RegistrySource {
                name: CLI_REGISTRY_NAME.to_string(),
                path: path.to_path_buf(),
            })
            .into_iter()
            .collect();

        sources.extend(self.registries.iter().map(|r| RegistrySource {
            name: r.name.clone(),
            path: if r.path.is_absolute() {
                r.path.clone()
            } else {
                project_root.join(&r.path)
            },
        }));

        if sources.is_empty() {
            if let Some(home) = dirs::home_dir() {
                sources.push(RegistrySource {
                    name: "default".to_string(),
                    path: home.join(".gitopsi").join("patterns"),
                });
            }
        }

        sources
    }
}

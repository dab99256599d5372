//! Pattern definitions (pattern.yaml)
//!
//! A pattern is a named, versioned bundle of infrastructure components that
//! can be generated into a GitOps repository. Patterns are produced by a
//! registry and treated as read-only by the installer.
//!
//! ```yaml
//! apiVersion: gitopsi.io/v1
//! kind: Pattern
//! metadata:
//!   name: monitoring
//!   version: 1.0.0
//!   category: observability
//! spec:
//!   components:
//!     - name: monitoring
//!       type: helm
//!       chart: kube-prometheus-stack
//!       repository: https://prometheus-community.github.io/helm-charts
//!       namespace: monitoring
//!   config:
//!     retention:
//!       type: string
//!       default: 15d
//! ```

pub mod component;
pub mod config;
pub mod dependency;
pub mod scaffold;
pub mod validation;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GitopsiError, Result, read_error};

pub use component::{Component, ComponentKind, ComponentType};
pub use config::{ConfigItem, ConfigMap, ConfigType, ConfigValue};
pub use dependency::Dependency;

/// File name of a pattern definition inside a registry
pub const PATTERN_FILE: &str = "pattern.yaml";

/// Default `apiVersion` of pattern definitions
pub const API_VERSION: &str = "gitopsi.io/v1";

/// Category used for the repository layout when a pattern declares none
pub const DEFAULT_CATEGORY: &str = "general";

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    "Pattern".to_string()
}

/// A named, versioned unit of infrastructure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    pub metadata: PatternMetadata,

    #[serde(default)]
    pub spec: PatternSpec,
}

/// Pattern metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMetadata {
    /// Unique pattern name
    pub name: String,

    /// Semver-like version string
    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub author: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// Platforms and GitOps tools the pattern supports
    #[serde(default, skip_serializing_if = "Compatibility::is_empty")]
    pub compatibility: Compatibility,
}

/// Declared platform and GitOps tool support.
///
/// An empty list means the pattern makes no claim and is treated as
/// compatible with everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gitops_tools: Vec<String>,
}

impl Compatibility {
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() && self.gitops_tools.is_empty()
    }
}

/// Pattern body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSpec {
    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,

    /// Declared configuration schema
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, ConfigItem>,

    /// Post-install checks, recorded but never executed here
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationCheck>,
}

/// An advisory post-install check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    pub name: String,
    pub check: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl Pattern {
    /// Create an empty pattern with the given name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: PatternMetadata {
                name: name.into(),
                version: version.into(),
                ..PatternMetadata::default()
            },
            spec: PatternSpec::default(),
        }
    }

    /// Parse a pattern from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a pattern from a `pattern.yaml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| read_error(path, &e))?;
        serde_yaml::from_str(&yaml).map_err(|e| GitopsiError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Serialize the pattern to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Category directory used in the generated layout
    pub fn category_dir(&self) -> &str {
        if self.metadata.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.metadata.category
        }
    }

    /// Check the pattern against the current platform and GitOps tool.
    ///
    /// Every mismatch becomes one `Incompatible` error; callers downgrade
    /// them to warnings.
    pub fn compatibility_issues(&self, platform: &str, gitops_tool: &str) -> Vec<GitopsiError> {
        let compat = &self.metadata.compatibility;
        let mut issues = Vec::new();

        if !compat.platforms.is_empty() && !contains_ignore_case(&compat.platforms, platform) {
            issues.push(GitopsiError::Incompatible {
                name: self.metadata.name.clone(),
                reason: format!(
                    "platform '{platform}' is not in [{}]",
                    compat.platforms.join(", ")
                ),
            });
        }

        if !compat.gitops_tools.is_empty()
            && !contains_ignore_case(&compat.gitops_tools, gitops_tool)
        {
            issues.push(GitopsiError::Incompatible {
                name: self.metadata.name.clone(),
                reason: format!(
                    "GitOps tool '{gitops_tool}' is not in [{}]",
                    compat.gitops_tools.join(", ")
                ),
            });
        }

        issues
    }
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONITORING: &str = r"
apiVersion: gitopsi.io/v1
kind: Pattern
metadata:
  name: monitoring
  version: 1.0.0
  description: Prometheus and Grafana
  category: observability
  tags: [metrics, prometheus]
  compatibility:
    platforms: [kubernetes, openshift]
spec:
  components:
    - name: monitoring
      type: helm
      chart: kube-prometheus-stack
      version: 45.0.0
      repository: https://prometheus-community.github.io/helm-charts
      namespace: monitoring
      values:
        grafana:
          enabled: true
    - name: dashboards
      type: kustomize
      path: ./dashboards
  dependencies:
    - name: cert-manager
      version: 1.2.0
    - name: ingress
      optional: true
  config:
    retention:
      type: string
      default: 15d
      description: Metrics retention
    replicas:
      type: integer
      default: 1
  validation:
    - name: prometheus-ready
      check: kubectl get pods -n monitoring
      timeout: 5m
";

    #[test]
    fn test_parse_pattern() {
        let pattern = Pattern::from_yaml(MONITORING).unwrap();
        assert_eq!(pattern.name(), "monitoring");
        assert_eq!(pattern.version(), "1.0.0");
        assert_eq!(pattern.category_dir(), "observability");
        assert_eq!(pattern.spec.components.len(), 2);
        assert_eq!(pattern.spec.components[0].kind.component_type(), ComponentType::Helm);
        assert_eq!(
            pattern.spec.components[0].namespace.as_deref(),
            Some("monitoring")
        );
        assert_eq!(pattern.spec.dependencies.len(), 2);
        assert!(pattern.spec.dependencies[1].optional);
        assert_eq!(
            pattern.spec.config["replicas"].default,
            Some(ConfigValue::Integer(1))
        );
        assert_eq!(pattern.spec.validation[0].timeout.as_deref(), Some("5m"));
    }

    #[test]
    fn test_yaml_round_trip_preserves_pattern() {
        let pattern = Pattern::from_yaml(MONITORING).unwrap();
        let yaml = pattern.to_yaml().unwrap();
        assert_eq!(Pattern::from_yaml(&yaml).unwrap(), pattern);
    }

    #[test]
    fn test_defaults_for_minimal_pattern() {
        let pattern = Pattern::from_yaml("metadata:\n  name: tiny\n  version: 0.1.0\n").unwrap();
        assert_eq!(pattern.api_version, API_VERSION);
        assert_eq!(pattern.kind, "Pattern");
        assert_eq!(pattern.category_dir(), DEFAULT_CATEGORY);
        assert!(pattern.spec.components.is_empty());
    }

    #[test]
    fn test_compatibility_matches_case_insensitively() {
        let pattern = Pattern::from_yaml(MONITORING).unwrap();
        assert!(pattern.compatibility_issues("Kubernetes", "argocd").is_empty());
    }

    #[test]
    fn test_compatibility_reports_each_mismatch() {
        let mut pattern = Pattern::from_yaml(MONITORING).unwrap();
        pattern.metadata.compatibility.gitops_tools = vec!["flux".to_string()];

        let issues = pattern.compatibility_issues("eks", "argocd");
        assert_eq!(issues.len(), 2);
        assert!(issues[0].to_string().contains("platform 'eks'"));
        assert!(issues[1].to_string().contains("GitOps tool 'argocd'"));
    }

    #[test]
    fn test_empty_compatibility_accepts_everything() {
        let pattern = Pattern::new("tiny", "0.1.0");
        assert!(pattern.compatibility_issues("anything", "flux").is_empty());
    }
}

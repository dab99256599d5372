//! Components: the deployable units inside a pattern

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// One deployable unit within a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,

    /// Namespace the component deploys into; used for conflict checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// Component type with its type-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentKind {
    Helm {
        #[serde(default)]
        chart: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        version: String,
        #[serde(default)]
        repository: String,
        #[serde(default, skip_serializing_if = "Mapping::is_empty")]
        values: Mapping,
    },
    Kustomize {
        #[serde(default)]
        path: String,
    },
    Manifest,
    Operator,
}

/// Bare component type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Helm,
    Kustomize,
    Manifest,
    Operator,
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Helm { .. } => ComponentType::Helm,
            ComponentKind::Kustomize { .. } => ComponentType::Kustomize,
            ComponentKind::Manifest => ComponentType::Manifest,
            ComponentKind::Operator => ComponentType::Operator,
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComponentType::Helm => "helm",
            ComponentType::Kustomize => "kustomize",
            ComponentType::Manifest => "manifest",
            ComponentType::Operator => "operator",
        };
        f.write_str(s)
    }
}

impl Component {
    /// Create a Helm component
    pub fn helm(
        name: impl Into<String>,
        chart: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: ComponentKind::Helm {
                chart: chart.into(),
                version: String::new(),
                repository: repository.into(),
                values: Mapping::new(),
            },
        }
    }

    /// Create a Kustomize component
    pub fn kustomize(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: ComponentKind::Kustomize { path: path.into() },
        }
    }

    /// Create a plain manifest component
    pub fn manifest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: ComponentKind::Manifest,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

//! Typed Kubernetes/Flux/ArgoCD documents emitted by the generator

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::Result;

const KUSTOMIZE_API: &str = "kustomize.config.k8s.io/v1beta1";
const FLUX_SOURCE_API: &str = "source.toolkit.fluxcd.io/v1beta2";
const FLUX_HELM_API: &str = "helm.toolkit.fluxcd.io/v2beta1";
const FLUX_KUSTOMIZE_API: &str = "kustomize.toolkit.fluxcd.io/v1";
const ARGOCD_API: &str = "argoproj.io/v1alpha1";

/// Namespace Flux objects live in
pub const FLUX_NAMESPACE: &str = "flux-system";

/// Namespace ArgoCD applications live in
pub const ARGOCD_NAMESPACE: &str = "argocd";

/// Label key stamped on generated objects
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(MANAGED_BY_LABEL.to_string(), "gitopsi".to_string());
        Self {
            name: name.into(),
            namespace: namespace.map(ToString::to_string),
            labels,
            annotations: BTreeMap::new(),
        }
    }
}

/// `kustomization.yaml`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub common_labels: BTreeMap<String, String>,
}

impl Kustomization {
    pub fn new(resources: Vec<String>) -> Self {
        Self {
            api_version: KUSTOMIZE_API,
            kind: "Kustomization",
            resources,
            common_labels: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRepository {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: HelmRepositorySpec,
}

#[derive(Debug, Serialize)]
pub struct HelmRepositorySpec {
    pub interval: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmRelease {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: HelmReleaseSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    pub interval: String,
    pub target_namespace: String,
    pub chart: HelmChartTemplate,
    pub install: HelmInstall,
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub values: Mapping,
}

#[derive(Debug, Serialize)]
pub struct HelmChartTemplate {
    pub spec: HelmChartSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartSpec {
    pub chart: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub source_ref: SourceRef,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmInstall {
    pub create_namespace: bool,
}

#[derive(Debug, Serialize)]
pub struct SourceRef {
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Flux `Kustomization` custom resource
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxKustomization {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: FluxKustomizationSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluxKustomizationSpec {
    pub interval: String,
    pub path: String,
    pub prune: bool,
    pub source_ref: SourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
}

/// ArgoCD `Application`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: ApplicationSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    pub project: String,
    pub source: ApplicationSource,
    pub destination: ApplicationDestination,
    pub sync_policy: SyncPolicy,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    pub target_revision: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationDestination {
    pub server: String,
    pub namespace: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPolicy {
    pub automated: AutomatedSync,
    pub sync_options: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedSync {
    pub prune: bool,
    pub self_heal: bool,
}

/// Placeholder object for manifest and operator components
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub data: BTreeMap<String, String>,
}

pub fn helm_repository(name: &str, url: &str) -> HelmRepository {
    HelmRepository {
        api_version: FLUX_SOURCE_API,
        kind: "HelmRepository",
        metadata: ObjectMeta::new(name, Some(FLUX_NAMESPACE)),
        spec: HelmRepositorySpec {
            interval: "1h".to_string(),
            url: url.to_string(),
        },
    }
}

pub fn helm_release(
    name: &str,
    chart: &str,
    version: &str,
    target_namespace: &str,
    values: Mapping,
) -> HelmRelease {
    HelmRelease {
        api_version: FLUX_HELM_API,
        kind: "HelmRelease",
        metadata: ObjectMeta::new(name, Some(FLUX_NAMESPACE)),
        spec: HelmReleaseSpec {
            interval: "10m".to_string(),
            target_namespace: target_namespace.to_string(),
            chart: HelmChartTemplate {
                spec: HelmChartSpec {
                    chart: chart.to_string(),
                    version: version.to_string(),
                    source_ref: SourceRef {
                        kind: "HelmRepository".to_string(),
                        name: name.to_string(),
                        namespace: Some(FLUX_NAMESPACE.to_string()),
                    },
                },
            },
            install: HelmInstall {
                create_namespace: true,
            },
            values,
        },
    }
}

pub fn flux_kustomization(
    name: &str,
    path: &str,
    target_namespace: Option<&str>,
) -> FluxKustomization {
    FluxKustomization {
        api_version: FLUX_KUSTOMIZE_API,
        kind: "Kustomization",
        metadata: ObjectMeta::new(name, Some(FLUX_NAMESPACE)),
        spec: FluxKustomizationSpec {
            interval: "10m".to_string(),
            path: path.to_string(),
            prune: true,
            source_ref: SourceRef {
                kind: "GitRepository".to_string(),
                name: FLUX_NAMESPACE.to_string(),
                namespace: None,
            },
            target_namespace: target_namespace.map(ToString::to_string),
        },
    }
}

pub fn argocd_application(
    name: &str,
    repo_url: &str,
    path: &str,
    namespace: &str,
    environment: &str,
) -> Application {
    let mut metadata = ObjectMeta::new(name, Some(ARGOCD_NAMESPACE));
    metadata
        .labels
        .insert("environment".to_string(), environment.to_string());
    Application {
        api_version: ARGOCD_API,
        kind: "Application",
        metadata,
        spec: ApplicationSpec {
            project: "default".to_string(),
            source: ApplicationSource {
                repo_url: repo_url.to_string(),
                target_revision: "HEAD".to_string(),
                path: path.to_string(),
            },
            destination: ApplicationDestination {
                server: "https://kubernetes.default.svc".to_string(),
                namespace: namespace.to_string(),
            },
            sync_policy: SyncPolicy {
                automated: AutomatedSync {
                    prune: true,
                    self_heal: true,
                },
                sync_options: vec!["CreateNamespace=true".to_string()],
            },
        },
    }
}

pub fn placeholder(name: &str, namespace: Option<&str>, component_type: &str) -> Placeholder {
    let mut metadata = ObjectMeta::new(name, namespace);
    metadata
        .annotations
        .insert("gitopsi.io/placeholder".to_string(), "true".to_string());
    metadata.annotations.insert(
        "gitopsi.io/component-type".to_string(),
        component_type.to_string(),
    );
    Placeholder {
        api_version: "v1",
        kind: "ConfigMap",
        metadata,
        data: BTreeMap::new(),
    }
}

/// Shallow merge: configuration keys replace value keys of the same name
pub fn merge_values(base: &Mapping, overlay: impl IntoIterator<Item = (String, Value)>) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(Value::String(key), value);
    }
    merged
}

/// Serialize a document, prefixed with an optional comment header
pub fn render<T: Serialize>(doc: &T, header: Option<&str>) -> Result<String> {
    let body = serde_yaml::to_string(doc)?;
    Ok(match header {
        Some(comment) => format!("# {comment}\n{body}"),
        None => body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_values_config_wins() {
        let mut base = Mapping::new();
        base.insert(Value::from("replicas"), Value::from(1));
        base.insert(Value::from("image"), Value::from("nginx"));

        let merged = merge_values(&base, vec![("replicas".to_string(), Value::from(3))]);
        assert_eq!(merged.get("replicas"), Some(&Value::from(3)));
        assert_eq!(merged.get("image"), Some(&Value::from("nginx")));
    }

    #[test]
    fn test_application_uses_argocd_field_names() {
        let app = argocd_application(
            "monitoring-dev",
            "https://example.com/gitops.git",
            "infrastructure/observability/monitoring/overlays/dev",
            "monitoring",
            "dev",
        );
        let yaml = render(&app, None).unwrap();
        assert!(yaml.contains("repoURL: https://example.com/gitops.git"));
        assert!(yaml.contains("selfHeal: true"));
        assert!(yaml.contains("prune: true"));
        assert!(yaml.contains("syncPolicy:"));
    }

    #[test]
    fn test_kustomization_omits_empty_labels() {
        let yaml = render(&Kustomization::new(vec!["a.yaml".to_string()]), None).unwrap();
        assert!(!yaml.contains("commonLabels"));
        assert!(yaml.starts_with("apiVersion: kustomize.config.k8s.io/v1beta1"));
    }

    #[test]
    fn test_render_header() {
        let yaml = render(&placeholder("quota", None, "manifest"), Some("Replace me")).unwrap();
        assert!(yaml.starts_with("# Replace me\n"));
        assert!(yaml.contains("gitopsi.io/placeholder"));
    }
}

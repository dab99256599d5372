//! Manifest generation
//!
//! Turns a pattern, its merged configuration and a list of environments into
//! repository files:
//!
//! ```text
//! infrastructure/<category>/<pattern>/base/<component files>
//! infrastructure/<category>/<pattern>/base/kustomization.yaml
//! infrastructure/<category>/<pattern>/overlays/<env>/kustomization.yaml
//! <tool>/applications/<pattern>-<env>.yaml
//! ```
//!
//! Generation happens in two steps. [`Generator::plan`] renders everything
//! into a [`ManifestSet`] without touching the disk; [`Generator::commit`]
//! writes the set inside a [`Transaction`], so either every file lands or
//! none does. Dry runs only plan, which keeps the reported paths identical
//! to what a real install records.

pub mod manifests;

use std::path::Path;

use crate::config::GitOpsTool;
use crate::error::{GitopsiError, Result};
use crate::pattern::{Component, ComponentKind, ConfigMap, Pattern};
use crate::transaction::Transaction;

use manifests::{Kustomization, render};

/// Repository URL used in applications when the project configures none
pub const DEFAULT_REPO_URL: &str = "https://github.com/your-org/your-gitops-repo.git";

/// Top-level directory for infrastructure patterns
pub const INFRASTRUCTURE_DIR: &str = "infrastructure";

const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// A rendered file, keyed by its project-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub path: String,
    pub content: String,
}

/// Ordered set of rendered files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSet {
    manifests: Vec<Manifest>,
}

impl ManifestSet {
    /// Add a file; two files at the same path are a pattern error
    fn push(&mut self, path: String, content: String) -> Result<()> {
        if self.manifests.iter().any(|m| m.path == path) {
            return Err(GitopsiError::PatternInvalid {
                message: format!("two generated files map to '{path}'"),
            });
        }
        self.manifests.push(Manifest { path, content });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Manifest> {
        self.manifests.iter()
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Project-relative paths in generation order
    pub fn paths(&self) -> Vec<String> {
        self.manifests.iter().map(|m| m.path.clone()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&Manifest> {
        self.manifests.iter().find(|m| m.path == path)
    }
}

/// `infrastructure/<category>/<pattern>`
pub fn pattern_dir(pattern: &Pattern) -> String {
    format!(
        "{INFRASTRUCTURE_DIR}/{}/{}",
        pattern.category_dir(),
        pattern.name()
    )
}

/// `infrastructure/<category>/<pattern>/overlays/<env>`
pub fn overlay_dir(pattern: &Pattern, environment: &str) -> String {
    format!("{}/overlays/{environment}", pattern_dir(pattern))
}

/// `<tool>/applications/<pattern>-<env>.yaml`
pub fn application_path(tool: GitOpsTool, pattern: &Pattern, environment: &str) -> String {
    format!(
        "{}/applications/{}-{environment}.yaml",
        tool.dir_name(),
        pattern.name()
    )
}

/// Renders patterns into GitOps repository files
#[derive(Debug, Clone)]
pub struct Generator {
    tool: GitOpsTool,
    repo_url: String,
}

impl Generator {
    pub fn new(tool: GitOpsTool, repo_url: impl Into<String>) -> Self {
        let repo_url = repo_url.into();
        Self {
            tool,
            repo_url: if repo_url.is_empty() {
                DEFAULT_REPO_URL.to_string()
            } else {
                repo_url
            },
        }
    }

    pub fn tool(&self) -> GitOpsTool {
        self.tool
    }

    /// Render every file for a pattern without writing anything
    pub fn plan(
        &self,
        pattern: &Pattern,
        config: &ConfigMap,
        environments: &[String],
    ) -> Result<ManifestSet> {
        let mut set = ManifestSet::default();
        let base_dir = format!("{}/base", pattern_dir(pattern));

        let mut resources = Vec::new();
        for component in &pattern.spec.components {
            for (file, content) in Self::component_files(pattern, component, config)? {
                set.push(format!("{base_dir}/{file}"), content)?;
                resources.push(file);
            }
        }
        set.push(
            format!("{base_dir}/{KUSTOMIZATION_FILE}"),
            render(&Kustomization::new(resources), None)?,
        )?;

        for env in environments {
            let mut overlay = Kustomization::new(vec!["../../base".to_string()]);
            overlay
                .common_labels
                .insert("environment".to_string(), env.clone());
            set.push(
                format!("{}/{KUSTOMIZATION_FILE}", overlay_dir(pattern, env)),
                render(&overlay, None)?,
            )?;
        }

        for env in environments {
            set.push(
                application_path(self.tool, pattern, env),
                self.application(pattern, env)?,
            )?;
        }

        tracing::debug!(pattern = %pattern.name(), files = set.len(), "planned manifests");
        Ok(set)
    }

    /// Write a planned set below the project root.
    ///
    /// Any failed write rolls back every file and directory created so far
    /// and restores overwritten files.
    pub fn commit(&self, project_root: &Path, set: &ManifestSet) -> Result<Vec<String>> {
        let mut transaction = Transaction::new();
        for manifest in set.iter() {
            let target = project_root.join(&manifest.path);
            tracing::debug!(path = %manifest.path, "writing manifest");
            transaction.write_file(&target, manifest.content.as_bytes())?;
        }
        transaction.commit();
        Ok(set.paths())
    }

    /// Plan and commit in one step
    pub fn generate(
        &self,
        project_root: &Path,
        pattern: &Pattern,
        config: &ConfigMap,
        environments: &[String],
    ) -> Result<Vec<String>> {
        let set = self.plan(pattern, config, environments)?;
        self.commit(project_root, &set)
    }

    /// Base files for one component, as `(file name, content)`
    fn component_files(
        pattern: &Pattern,
        component: &Component,
        config: &ConfigMap,
    ) -> Result<Vec<(String, String)>> {
        let name = &component.name;
        let namespace = component.namespace.as_deref();

        let files = match &component.kind {
            ComponentKind::Helm {
                chart,
                version,
                repository,
                values,
            } => {
                let values = manifests::merge_values(
                    values,
                    config.iter().map(|(k, v)| (k.clone(), v.to_yaml())),
                );
                let target = namespace.unwrap_or(pattern.name());
                vec![
                    (
                        format!("{name}-repo.yaml"),
                        render(&manifests::helm_repository(name, repository), None)?,
                    ),
                    (
                        format!("{name}-release.yaml"),
                        render(
                            &manifests::helm_release(name, chart, version, target, values),
                            None,
                        )?,
                    ),
                ]
            }
            ComponentKind::Kustomize { path } => vec![(
                format!("{name}-kustomization.yaml"),
                render(&manifests::flux_kustomization(name, path, namespace), None)?,
            )],
            ComponentKind::Manifest | ComponentKind::Operator => {
                let kind = component.kind.component_type().to_string();
                vec![(
                    format!("{name}.yaml"),
                    render(
                        &manifests::placeholder(name, namespace, &kind),
                        Some(&format!("Placeholder for {kind} component '{name}'")),
                    )?,
                )]
            }
        };
        Ok(files)
    }

    fn application(&self, pattern: &Pattern, environment: &str) -> Result<String> {
        let app_name = format!("{}-{environment}", pattern.name());
        let path = overlay_dir(pattern, environment);
        let namespace = target_namespace(pattern);

        match self.tool {
            GitOpsTool::Argocd => render(
                &manifests::argocd_application(
                    &app_name,
                    &self.repo_url,
                    &path,
                    namespace,
                    environment,
                ),
                None,
            ),
            GitOpsTool::Flux => {
                let mut kustomization = manifests::flux_kustomization(&app_name, &path, None);
                kustomization
                    .metadata
                    .labels
                    .insert("environment".to_string(), environment.to_string());
                render(&kustomization, None)
            }
        }
    }
}

/// Namespace an application deploys into: the first declared component
/// namespace, else the pattern name
fn target_namespace(pattern: &Pattern) -> &str {
    pattern
        .spec
        .components
        .iter()
        .find_map(|c| c.namespace.as_deref())
        .unwrap_or(pattern.name())
}

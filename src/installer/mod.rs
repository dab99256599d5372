//! Pattern lifecycle orchestration
//!
//! The [`Installer`] composes the registry, generator, conflict checker and
//! ledger into the install, uninstall and update workflows plus the
//! read-only queries (list, status, conflicts, dependency tree, updates).
//!
//! ## Install flow
//!
//! 1. Check environment names (an empty list means `dev`)
//! 2. Load the ledger (a broken ledger is a warning, not an error)
//! 3. Refuse to reinstall unless forced
//! 4. Fetch and validate the pattern
//! 5. Collect compatibility and conflict warnings
//! 6. Install dependencies depth-first, failing fast on cycles
//! 7. Merge and validate configuration
//! 8. Plan manifests and refuse paths owned by other patterns; stop here on
//!    a dry run
//! 9. Commit manifests to disk
//! 10. Record the pattern in the ledger
//!
//! The installer never prompts. Confirmation belongs to the command layer.

pub mod cleanup;
pub mod conflict;
pub mod deps;
pub mod options;

use std::collections::BTreeMap;

use chrono::Utc;

use crate::config::{InstallStatus, InstalledPattern, State};
use crate::error::{GitopsiError, Result};
use crate::generator::Generator;
use crate::pattern::config::{merge_config, parse_overrides, validate_config};
use crate::pattern::validation::{is_valid_name, validate_pattern};
use crate::pattern::{ConfigMap, Dependency, Pattern};
use crate::project::Project;
use crate::registry::Registry;

pub use conflict::{find_conflicts, find_path_collision};
pub use options::{
    DEFAULT_ENVIRONMENT, DependencyResult, DependencyStatus, Health, InstallOptions,
    InstallResult, PatternStatus, UninstallOptions, UninstallResult, UpdateOptions,
};

/// Message returned by an update that has nothing to do
pub const ALREADY_AT_TARGET: &str = "Already at target version";

/// Installs, removes and inspects patterns in one project
pub struct Installer<'a> {
    project: &'a Project,
    registry: &'a dyn Registry,
    generator: Generator,
}

impl<'a> Installer<'a> {
    pub fn new(project: &'a Project, registry: &'a dyn Registry) -> Self {
        Self {
            project,
            registry,
            generator: project.generator(),
        }
    }

    /// Install a pattern and, unless skipped, its dependencies
    pub fn install(&self, name: &str, options: &InstallOptions) -> Result<InstallResult> {
        let mut chain = Vec::new();
        self.install_chain(name, options, &mut chain)
    }

    fn install_chain(
        &self,
        name: &str,
        options: &InstallOptions,
        chain: &mut Vec<String>,
    ) -> Result<InstallResult> {
        deps::check_cycle(chain, name)?;
        let environments = environments_or_default(name, &options.environments)?;
        let mut result = InstallResult::default();

        let state = match self.project.store.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "could not load ledger, continuing with an empty one");
                result.warnings.push(format!("Could not load ledger: {e}"));
                State::default()
            }
        };

        let previous = state.get(name).cloned();
        if let Some(existing) = &previous {
            if !options.force {
                result.version = existing.version().to_string();
                result.message = format!(
                    "Pattern '{name}' is already installed (version {}); use --force to reinstall",
                    existing.version()
                );
                return Ok(result);
            }
        }

        let (_, registry_id) = self.registry.find_pattern(name)?;
        let pattern = self
            .registry
            .fetch_pattern(&registry_id, name, &options.version)?;
        validate_pattern(&pattern)?;
        result.version = pattern.version().to_string();
        tracing::info!(pattern = %name, version = %pattern.version(), registry = %registry_id, "installing");

        let settings = &self.project.settings;
        for issue in pattern.compatibility_issues(&settings.platform, settings.gitops_tool.dir_name()) {
            tracing::warn!(pattern = %name, "{issue}");
            result.warnings.push(issue.to_string());
        }
        for found in find_conflicts(&pattern, &state) {
            tracing::warn!(pattern = %name, "conflict: {found}");
            result.warnings.push(format!("Conflict: {found}"));
        }

        if !options.skip_deps {
            chain.push(name.to_string());
            let installed_deps = self.install_dependencies(name, &pattern.spec.dependencies, options, chain);
            chain.pop();
            result.dependencies = installed_deps?;
        }

        let mut overlay = options.config.clone();
        overlay.extend(parse_overrides(name, &pattern.spec.config, &options.overrides)?);
        let merged = merge_config(&pattern.spec.config, &overlay);
        validate_config(name, &pattern.spec.config, &merged)?;

        let plan = self.generator.plan(&pattern, &merged, &environments)?;
        let planned = plan.paths();
        if let Some((path, owner)) = find_path_collision(name, &planned, &state) {
            return Err(GitopsiError::PathConflict {
                name: name.to_string(),
                path: path.to_string(),
                owner: owner.to_string(),
            });
        }

        if options.dry_run {
            result.success = true;
            result.generated_paths = planned;
            result.message = format!(
                "Would install {name} {} ({} files)",
                pattern.version(),
                plan.len()
            );
            return Ok(result);
        }

        let paths = self.generator.commit(&self.project.root, &plan)?;

        if let Some(previous) = &previous {
            let stale: Vec<String> = previous
                .paths
                .iter()
                .filter(|p| !paths.contains(p))
                .cloned()
                .collect();
            if !stale.is_empty() {
                let (_, warnings) = cleanup::remove_files(&self.project.root, &stale, true)?;
                result.warnings.extend(warnings);
            }
        }

        let entry = InstalledPattern {
            pattern,
            installed_at: Utc::now(),
            config: merged,
            environments,
            status: InstallStatus::Installed,
            paths: paths.clone(),
        };
        // Reload under the lock so entries written by dependency installs survive
        if let Err(e) = self.project.store.update(|state| state.record(entry)) {
            tracing::warn!(pattern = %name, error = %e, "ledger not updated");
            result
                .warnings
                .push(format!("Files were generated but the ledger was not updated: {e}"));
        }

        tracing::info!(pattern = %name, files = paths.len(), "installed");
        result.success = true;
        result.message = format!("Installed {name} {}", result.version);
        result.generated_paths = paths;
        Ok(result)
    }

    fn install_dependencies(
        &self,
        parent: &str,
        dependencies: &[Dependency],
        options: &InstallOptions,
        chain: &mut Vec<String>,
    ) -> Result<Vec<DependencyResult>> {
        let mut results = Vec::with_capacity(dependencies.len());
        for dep in dependencies {
            let outcome = self.install_dependency(dep, options, chain)?;
            if outcome.status == DependencyStatus::Failed && !dep.optional {
                return Err(GitopsiError::DependencyFailed {
                    name: parent.to_string(),
                    dependency: dep.name.clone(),
                    reason: outcome.message,
                });
            }
            if outcome.status == DependencyStatus::Failed {
                tracing::warn!(dependency = %dep.name, "optional dependency failed: {}", outcome.message);
            }
            results.push(outcome);
        }
        Ok(results)
    }

    /// Install one dependency.
    ///
    /// Failures become a `failed` result; only a cycle is returned as an error.
    fn install_dependency(
        &self,
        dep: &Dependency,
        options: &InstallOptions,
        chain: &mut Vec<String>,
    ) -> Result<DependencyResult> {
        let recorded = self
            .project
            .store
            .load()
            .ok()
            .and_then(|state| state.get(&dep.name).map(|p| p.version().to_string()));
        if let Some(version) = recorded {
            tracing::debug!(dependency = %dep.name, "already installed");
            return Ok(DependencyResult {
                name: dep.name.clone(),
                version,
                status: DependencyStatus::Skipped,
                message: "already installed".to_string(),
            });
        }

        let dep_options = options.for_dependency(&dep.version);
        match self.install_chain(&dep.name, &dep_options, chain) {
            Ok(installed) => Ok(DependencyResult {
                name: dep.name.clone(),
                version: installed.version,
                status: match (installed.success, options.dry_run) {
                    (true, true) => DependencyStatus::Planned,
                    (true, false) => DependencyStatus::Installed,
                    (false, _) => DependencyStatus::Skipped,
                },
                message: installed.message,
            }),
            Err(e @ GitopsiError::CycleDetected { .. }) => Err(e),
            Err(e) => Ok(DependencyResult {
                name: dep.name.clone(),
                version: dep.version.clone(),
                status: DependencyStatus::Failed,
                message: e.to_string(),
            }),
        }
    }

    /// Remove an installed pattern. Dependencies are left alone.
    pub fn uninstall(&self, name: &str, options: &UninstallOptions) -> Result<UninstallResult> {
        let state = self.project.store.load()?;
        let installed = state
            .get(name)
            .ok_or_else(|| GitopsiError::NotInstalled {
                name: name.to_string(),
            })?;

        let mut result = UninstallResult::default();
        if !options.keep_files {
            let (removed, warnings) =
                cleanup::remove_files(&self.project.root, &installed.paths, options.force)?;
            result.removed = removed;
            result.warnings = warnings;
        }

        self.project.store.update(|state| state.remove(name))?;
        tracing::info!(pattern = %name, removed = result.removed.len(), "uninstalled");
        Ok(result)
    }

    /// Move an installed pattern to another version, keeping its
    /// configuration and environments
    pub fn update(&self, name: &str, options: &UpdateOptions) -> Result<InstallResult> {
        let state = self.project.store.load()?;
        let installed = state
            .get(name)
            .ok_or_else(|| GitopsiError::NotInstalled {
                name: name.to_string(),
            })?;

        let (entry, registry_id) = self.registry.find_pattern(name)?;
        let target = if options.version.is_empty() {
            entry.latest
        } else {
            options.version.clone()
        };

        if target == installed.version() && !options.force {
            return Ok(InstallResult {
                success: true,
                message: ALREADY_AT_TARGET.to_string(),
                version: target,
                ..InstallResult::default()
            });
        }

        tracing::info!(pattern = %name, from = %installed.version(), to = %target, "updating");
        let next = self.registry.fetch_pattern(&registry_id, name, &target)?;
        let (config, dropped) = carry_config(installed, &next);

        let install_options = InstallOptions {
            version: target,
            config,
            environments: installed.environments.clone(),
            force: true,
            dry_run: options.dry_run,
            auto_approve: options.auto_approve,
            ..InstallOptions::default()
        };
        let mut result = self.install(name, &install_options)?;
        result.warnings.extend(dropped);
        Ok(result)
    }

    /// Installed patterns ordered by name
    pub fn list(&self) -> Result<Vec<InstalledPattern>> {
        Ok(self.project.store.load()?.patterns.into_values().collect())
    }

    /// Compare an installed pattern's recorded files with the disk
    pub fn status(&self, name: &str) -> Result<PatternStatus> {
        let state = self.project.store.load()?;
        let installed = state
            .get(name)
            .ok_or_else(|| GitopsiError::NotInstalled {
                name: name.to_string(),
            })?;

        let missing: Vec<String> = installed
            .paths
            .iter()
            .filter(|p| !self.project.root.join(p).exists())
            .cloned()
            .collect();

        Ok(PatternStatus {
            name: name.to_string(),
            version: installed.version().to_string(),
            health: if missing.is_empty() {
                Health::Healthy
            } else {
                Health::Degraded
            },
            installed_at: installed.installed_at,
            environments: installed.environments.clone(),
            paths: installed.paths.clone(),
            missing,
        })
    }

    /// Conflicts the latest version of a pattern would have with what is installed
    pub fn conflict_check(&self, name: &str) -> Result<Vec<String>> {
        let state = self.project.store.load()?;
        let (_, registry_id) = self.registry.find_pattern(name)?;
        let candidate = self.registry.fetch_pattern(&registry_id, name, "")?;
        Ok(find_conflicts(&candidate, &state))
    }

    pub fn dependency_tree(&self, name: &str) -> Result<BTreeMap<String, Vec<String>>> {
        deps::dependency_tree(self.registry, name)
    }

    /// Installed patterns with a newer registry version: name -> latest
    pub fn check_updates(&self) -> Result<BTreeMap<String, String>> {
        let state = self.project.store.load()?;
        let mut updates = BTreeMap::new();
        for (name, installed) in &state.patterns {
            match self.registry.find_pattern(name) {
                Ok((entry, _)) if entry.latest != installed.version() => {
                    updates.insert(name.clone(), entry.latest);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(pattern = %name, error = %e, "skipping update check"),
            }
        }
        Ok(updates)
    }
}

/// Requested environments, or `dev` when none are given. Names become path
/// segments, so they follow the same rules as pattern names.
fn environments_or_default(name: &str, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(vec![DEFAULT_ENVIRONMENT.to_string()]);
    }
    match requested.iter().find(|env| !is_valid_name(env)) {
        Some(env) => Err(GitopsiError::ValidationFailed {
            name: name.to_string(),
            message: format!("environment '{env}' must be lowercase letters, digits and '-'"),
        }),
        None => Ok(requested.to_vec()),
    }
}

/// Configuration to carry into another version of an installed pattern.
///
/// Values equal to the installed version's default are dropped so the new
/// version's defaults apply. Keys the new version no longer declares are
/// dropped with a warning.
fn carry_config(installed: &InstalledPattern, next: &Pattern) -> (ConfigMap, Vec<String>) {
    let previous = &installed.pattern.spec.config;
    let mut config = ConfigMap::new();
    let mut warnings = Vec::new();

    for (key, value) in &installed.config {
        let was_default = previous
            .get(key)
            .and_then(|item| item.default.as_ref())
            .is_some_and(|default| default == value);
        if was_default {
            continue;
        }
        if next.spec.config.contains_key(key) {
            config.insert(key.clone(), value.clone());
        } else {
            tracing::warn!(pattern = %next.name(), key = %key, "dropping undeclared configuration");
            warnings.push(format!(
                "Dropped configuration '{key}={value}': not declared by {} {}",
                next.name(),
                next.version()
            ));
        }
    }

    (config, warnings)
}

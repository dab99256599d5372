//! Pattern definition validation
//!
//! Checks a `pattern.yaml` for authoring mistakes before it is published to a
//! registry. All problems are collected and reported together.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{GitopsiError, Result};

use super::{ComponentKind, Pattern};

/// Check whether a pattern or component name is usable as a path segment
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Parse a version, allowing a leading `v`
pub fn parse_version(version: &str) -> Option<semver::Version> {
    semver::Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}

/// Validate a loaded pattern
pub fn validate_pattern(pattern: &Pattern) -> Result<()> {
    let problems = collect_problems(pattern);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(GitopsiError::PatternInvalid {
            message: format!("{}: {}", pattern.name(), problems.join("; ")),
        })
    }
}

/// Load and validate a `pattern.yaml` file, or a directory containing one
pub fn validate_pattern_file(path: &Path) -> Result<Pattern> {
    let file = if path.is_dir() {
        path.join(super::PATTERN_FILE)
    } else {
        path.to_path_buf()
    };
    let pattern = Pattern::from_file(&file)?;
    validate_pattern(&pattern)?;
    Ok(pattern)
}

fn collect_problems(pattern: &Pattern) -> Vec<String> {
    let mut problems = Vec::new();
    let meta = &pattern.metadata;

    if !is_valid_name(&meta.name) {
        problems.push(format!(
            "name '{}' must be lowercase letters, digits and '-'",
            meta.name
        ));
    }
    if !meta.category.is_empty() && !is_valid_name(&meta.category) {
        problems.push(format!(
            "category '{}' must be lowercase letters, digits and '-'",
            meta.category
        ));
    }
    if parse_version(&meta.version).is_none() {
        problems.push(format!("version '{}' is not a semantic version", meta.version));
    }
    if pattern.kind != "Pattern" {
        problems.push(format!("kind must be 'Pattern', got '{}'", pattern.kind));
    }

    check_components(pattern, &mut problems);
    check_dependencies(pattern, &mut problems);

    for (key, item) in &pattern.spec.config {
        if let Some(default) = &item.default {
            if default.config_type() != item.kind {
                problems.push(format!(
                    "config '{key}' default is {} but declared {}",
                    default.config_type(),
                    item.kind
                ));
            }
        }
    }

    for check in &pattern.spec.validation {
        if check.name.is_empty() || check.check.is_empty() {
            problems.push("validation checks need a name and a check".to_string());
        }
    }

    problems
}

fn check_components(pattern: &Pattern, problems: &mut Vec<String>) {
    if pattern.spec.components.is_empty() {
        problems.push("at least one component is required".to_string());
    }

    let mut seen = HashSet::new();
    for component in &pattern.spec.components {
        if !is_valid_name(&component.name) {
            problems.push(format!("component name '{}' is invalid", component.name));
        }
        if !seen.insert(component.name.as_str()) {
            problems.push(format!("duplicate component '{}'", component.name));
        }
        match &component.kind {
            ComponentKind::Helm {
                chart, repository, ..
            } => {
                if chart.is_empty() {
                    problems.push(format!("helm component '{}' has no chart", component.name));
                }
                if repository.is_empty() {
                    problems.push(format!(
                        "helm component '{}' has no repository",
                        component.name
                    ));
                }
            }
            ComponentKind::Kustomize { path } if path.is_empty() => {
                problems.push(format!(
                    "kustomize component '{}' has no path",
                    component.name
                ));
            }
            _ => {}
        }
    }
}

fn check_dependencies(pattern: &Pattern, problems: &mut Vec<String>) {
    for dep in &pattern.spec.dependencies {
        if dep.name.is_empty() {
            problems.push("dependency name cannot be empty".to_string());
        } else if dep.name == pattern.metadata.name {
            problems.push("a pattern cannot depend on itself".to_string());
        }
        if !dep.version.is_empty() && parse_version(&dep.version).is_none() {
            problems.push(format!(
                "dependency '{}' version '{}' is not a semantic version",
                dep.name, dep.version
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Component, ConfigItem, ConfigType, ConfigValue, Dependency};

    fn valid_pattern() -> Pattern {
        let mut pattern = Pattern::new("monitoring", "1.0.0");
        pattern.spec.components.push(
            Component::helm(
                "monitoring",
                "kube-prometheus-stack",
                "https://prometheus-community.github.io/helm-charts",
            )
            .with_namespace("monitoring"),
        );
        pattern
    }

    #[test]
    fn test_valid_pattern_passes() {
        assert!(validate_pattern(&valid_pattern()).is_ok());
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_name("cert-manager"));
        assert!(is_valid_name("k8s"));
        assert!(!is_valid_name("Cert"));
        assert!(!is_valid_name("-x"));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_version_allows_v_prefix() {
        assert!(parse_version("v1.2.3").is_some());
        assert!(parse_version("1.2").is_none());
    }

    #[test]
    fn test_collects_every_problem() {
        let mut pattern = valid_pattern();
        pattern.metadata.version = "latest".to_string();
        pattern
            .spec
            .components
            .push(Component::helm("monitoring", "", "https://example.com"));
        pattern
            .spec
            .components
            .push(Component::kustomize("extras", ""));
        pattern
            .spec
            .dependencies
            .push(Dependency::required("monitoring", ""));
        pattern.spec.config.insert(
            "replicas".to_string(),
            ConfigItem {
                kind: ConfigType::Integer,
                default: Some(ConfigValue::String("one".to_string())),
                description: String::new(),
                required: false,
            },
        );

        let message = validate_pattern(&pattern).unwrap_err().to_string();
        assert!(message.contains("not a semantic version"));
        assert!(message.contains("duplicate component 'monitoring'"));
        assert!(message.contains("has no chart"));
        assert!(message.contains("'extras' has no path"));
        assert!(message.contains("cannot depend on itself"));
        assert!(message.contains("default is string but declared integer"));
    }

    #[test]
    fn test_category_must_be_a_path_segment() {
        let mut pattern = valid_pattern();
        pattern.metadata.category = "../../evil".to_string();
        let message = validate_pattern(&pattern).unwrap_err().to_string();
        assert!(message.contains("category '../../evil'"), "{message}");

        pattern.metadata.category = String::new();
        assert!(validate_pattern(&pattern).is_ok());
    }

    #[test]
    fn test_requires_components() {
        let pattern = Pattern::new("empty", "0.1.0");
        let message = validate_pattern(&pattern).unwrap_err().to_string();
        assert!(message.contains("at least one component"));
    }

    #[test]
    fn test_validate_file_in_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("pattern.yaml"),
            valid_pattern().to_yaml().unwrap(),
        )
        .unwrap();
        let pattern = validate_pattern_file(temp.path()).unwrap();
        assert_eq!(pattern.name(), "monitoring");
    }
}

//! Scaffolding of new pattern definitions

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{GitopsiError, Result, write_error};

use super::{
    Component, ComponentKind, ConfigItem, ConfigType, ConfigValue, PATTERN_FILE, Pattern,
    ValidationCheck, validation,
};

/// Create `<dir>/<name>/pattern.yaml` and a README for a new pattern.
///
/// Returns the created pattern directory. An existing `pattern.yaml` is
/// never overwritten.
pub fn scaffold_pattern(dir: &Path, name: &str, category: &str) -> Result<PathBuf> {
    if !validation::is_valid_name(name) {
        return Err(GitopsiError::PatternInvalid {
            message: format!("name '{name}' must be lowercase letters, digits and '-'"),
        });
    }

    let pattern_dir = dir.join(name);
    let pattern_file = pattern_dir.join(PATTERN_FILE);
    if pattern_file.exists() {
        return Err(GitopsiError::FileWriteFailed {
            path: pattern_file.display().to_string(),
            reason: "pattern already exists".to_string(),
        });
    }

    std::fs::create_dir_all(&pattern_dir).map_err(|e| write_error(&pattern_dir, &e))?;

    let pattern = skeleton(name, category);
    let yaml = pattern.to_yaml()?;
    std::fs::write(&pattern_file, yaml).map_err(|e| write_error(&pattern_file, &e))?;

    let readme = pattern_dir.join("README.md");
    if !readme.exists() {
        std::fs::write(&readme, readme_text(&pattern)).map_err(|e| write_error(&readme, &e))?;
    }

    tracing::info!(pattern = name, path = %pattern_dir.display(), "scaffolded pattern");
    Ok(pattern_dir)
}

fn skeleton(name: &str, category: &str) -> Pattern {
    let mut pattern = Pattern::new(name, "0.1.0");
    pattern.metadata.description = format!("{name} pattern");
    pattern.metadata.category = category.to_string();

    let mut values = Mapping::new();
    values.insert(Value::from("replicaCount"), Value::from(1));
    let mut component = Component::helm(name, name, "https://charts.example.com").with_namespace(name);
    if let ComponentKind::Helm { values: v, .. } = &mut component.kind {
        *v = values;
    }
    pattern.spec.components.push(component);

    pattern.spec.config.insert(
        "replicaCount".to_string(),
        ConfigItem {
            kind: ConfigType::Integer,
            default: Some(ConfigValue::Integer(1)),
            description: "Number of replicas".to_string(),
            required: false,
        },
    );
    pattern.spec.validation.push(ValidationCheck {
        name: format!("{name}-ready"),
        check: format!("kubectl rollout status deployment/{name} -n {name}"),
        timeout: Some("5m".to_string()),
    });
    pattern
}

fn readme_text(pattern: &Pattern) -> String {
    format!(
        "# {name}\n\n{description}\n\n## Install\n\n```sh\ngitopsi install {name} --env dev\n```\n",
        name = pattern.name(),
        description = pattern.metadata.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_creates_valid_pattern() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = scaffold_pattern(temp.path(), "redis", "databases").unwrap();

        assert!(dir.join("README.md").is_file());
        let pattern = validation::validate_pattern_file(&dir).unwrap();
        assert_eq!(pattern.name(), "redis");
        assert_eq!(pattern.metadata.category, "databases");
    }

    #[test]
    fn test_scaffold_refuses_to_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        scaffold_pattern(temp.path(), "redis", "databases").unwrap();
        assert!(scaffold_pattern(temp.path(), "redis", "databases").is_err());
    }

    #[test]
    fn test_scaffold_rejects_bad_name() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(scaffold_pattern(temp.path(), "Bad Name", "x").is_err());
        assert!(!temp.path().join("Bad Name").exists());
    }
}

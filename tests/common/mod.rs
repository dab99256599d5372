//! Common test utilities for gitopsi integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A GitOps project and a pattern registry for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Project root
    pub path: PathBuf,
    /// Registry directory, seeded from the fixture registry
    pub registry: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project with an empty registry
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("gitops");
        let registry = temp.path().join("registry");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        std::fs::create_dir_all(&registry).expect("Failed to create registry directory");
        Self {
            temp,
            path,
            registry,
        }
    }

    /// Create a project whose registry holds the fixture patterns
    pub fn with_fixture_registry() -> Self {
        let project = Self::new();
        copy_dir_recursive(&fixture_registry(), &project.registry)
            .expect("Failed to copy fixture registry");
        project
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the project root
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists relative to the project root
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Publish a pattern definition into the registry
    pub fn publish(&self, dir: &str, yaml: &str) {
        let target = self.registry.join(dir);
        std::fs::create_dir_all(&target).expect("Failed to create pattern directory");
        std::fs::write(target.join("pattern.yaml"), yaml).expect("Failed to write pattern");
    }

    /// Write `.gitopsi/config.yaml`
    pub fn write_settings(&self, yaml: &str) {
        self.write_file(".gitopsi/config.yaml", yaml);
    }

    /// Read the ledger as raw YAML
    pub fn ledger(&self) -> serde_yaml::Value {
        serde_yaml::from_str(&self.read_file(".gitopsi/patterns.yaml"))
            .expect("Failed to parse ledger")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture registry shipped with the tests
pub fn fixture_registry() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join("registry")
}

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    if !dst.exists() {
        std::fs::create_dir_all(dst)?;
    }

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
        assert!(project.registry.exists());
    }

    #[test]
    fn test_fixture_registry_is_copied() {
        let project = TestProject::with_fixture_registry();
        assert!(
            project
                .registry
                .join("observability/monitoring/1.0.0/pattern.yaml")
                .exists()
        );
    }
}

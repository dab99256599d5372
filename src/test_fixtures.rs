//! Test fixtures shared by unit tests.
//!
//! ```ignore
//! use crate::test_fixtures::TestProject;
//!
//! let fixture = TestProject::new();
//! fixture.publish(&monitoring_pattern());
//! let registry = fixture.registry();
//! let installer = Installer::new(&fixture.project, &registry);
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::pattern::{Component, Dependency, PATTERN_FILE, Pattern};
use crate::project::Project;
use crate::registry::LocalRegistry;

/// A project directory and a registry directory under one temp dir
pub struct TestProject {
    _temp: TempDir,
    pub project: Project,
    pub registry_dir: PathBuf,
}

impl TestProject {
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("repo");
        let registry_dir = temp.path().join("registry");
        std::fs::create_dir_all(&root).expect("Failed to create project root");
        std::fs::create_dir_all(&registry_dir).expect("Failed to create registry");
        let project = Project::open(&root).expect("Failed to open project");
        Self {
            _temp: temp,
            project,
            registry_dir,
        }
    }

    pub fn root(&self) -> &Path {
        &self.project.root
    }

    /// Publish a pattern version as `<registry>/<name>/<version>/pattern.yaml`
    pub fn publish(&self, pattern: &Pattern) {
        let dir = self
            .registry_dir
            .join(pattern.name())
            .join(pattern.version());
        std::fs::create_dir_all(&dir).expect("Failed to create pattern dir");
        std::fs::write(
            dir.join(PATTERN_FILE),
            pattern.to_yaml().expect("Failed to serialize pattern"),
        )
        .expect("Failed to write pattern");
    }

    /// Open the registry; call after publishing
    #[must_use]
    pub fn registry(&self) -> LocalRegistry {
        LocalRegistry::open("test", &self.registry_dir)
    }
}

/// `monitoring` 1.0.0: one Helm component in namespace `monitoring`
#[must_use]
pub fn monitoring_pattern() -> Pattern {
    let mut pattern = Pattern::new("monitoring", "1.0.0");
    pattern.metadata.category = "observability".to_string();
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

/// A single-manifest pattern with the given dependencies
#[must_use]
pub fn simple_pattern(name: &str, version: &str, dependencies: Vec<Dependency>) -> Pattern {
    let mut pattern = Pattern::new(name, version);
    pattern.spec.components.push(Component::manifest(name));
    pattern.spec.dependencies = dependencies;
    pattern
}

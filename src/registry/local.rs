//! Filesystem registry
//!
//! A registry rooted at a directory. Any `pattern.yaml` below the root is a
//! published pattern version; the layout under the root is free-form, e.g.
//!
//! ```text
//! <root>/
//! ├── observability/monitoring/1.0.0/pattern.yaml
//! ├── observability/monitoring/1.1.0/pattern.yaml
//! └── security/cert-manager/pattern.yaml
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{GitopsiError, Result};
use crate::pattern::Pattern;

use super::index::{RegistryIndex, scan_patterns};
use super::{IndexEntry, Registry};

/// Registry backed by a local directory tree
#[derive(Debug)]
pub struct LocalRegistry {
    id: String,
    root: PathBuf,
    index: RegistryIndex,
    /// name -> version -> pattern.yaml path
    files: BTreeMap<String, BTreeMap<String, PathBuf>>,
}

impl LocalRegistry {
    /// Open a registry and scan it for patterns.
    ///
    /// A missing root is an empty registry.
    pub fn open(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let id = id.into();
        let root = root.into();

        let scanned = if root.is_dir() {
            scan_patterns(&root)
        } else {
            tracing::debug!(registry = %id, root = %root.display(), "registry directory missing");
            Vec::new()
        };

        let mut files: BTreeMap<String, BTreeMap<String, PathBuf>> = BTreeMap::new();
        for (path, pattern) in &scanned {
            files
                .entry(pattern.name().to_string())
                .or_default()
                .insert(pattern.version().to_string(), path.clone());
        }
        let index = RegistryIndex::from_patterns(scanned.iter().map(|(_, p)| p));
        tracing::debug!(registry = %id, patterns = index.patterns.len(), "registry scanned");

        Self {
            id,
            root,
            index,
            files,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Registry for LocalRegistry {
    fn find_pattern(&self, name: &str) -> Result<(IndexEntry, String)> {
        self.index
            .find(name)
            .cloned()
            .map(|entry| (entry, self.id.clone()))
            .ok_or_else(|| GitopsiError::PatternNotFound {
                name: name.to_string(),
            })
    }

    fn fetch_pattern(&self, registry_id: &str, name: &str, version: &str) -> Result<Pattern> {
        if registry_id != self.id {
            return Err(GitopsiError::RegistryFailed {
                registry: registry_id.to_string(),
                reason: format!("unknown registry (this is '{}')", self.id),
            });
        }

        let (entry, _) = self.find_pattern(name)?;
        let version = if version.is_empty() {
            entry.latest.as_str()
        } else {
            version
        };

        let path = self
            .files
            .get(name)
            .and_then(|versions| versions.get(version))
            .ok_or_else(|| GitopsiError::VersionNotFound {
                name: name.to_string(),
                version: version.to_string(),
            })?;

        tracing::debug!(pattern = name, version, path = %path.display(), "fetching pattern");
        Pattern::from_file(path)
    }

    fn entries(&self) -> Vec<IndexEntry> {
        self.index.patterns.clone()
    }
}

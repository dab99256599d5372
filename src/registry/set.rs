//! Ordered set of registries

use crate::error::{GitopsiError, Result};
use crate::pattern::Pattern;

use super::{IndexEntry, Registry, local::LocalRegistry};

/// Several registries searched in order; the first one holding a pattern wins
#[derive(Default)]
pub struct RegistrySet {
    registries: Vec<LocalRegistry>,
}

impl RegistrySet {
    pub fn new() -> Self {
        Self {
            registries: Vec::new(),
        }
    }

    pub fn push(&mut self, registry: LocalRegistry) {
        self.registries.push(registry);
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Search every registry by name, description or tag.
    ///
    /// Names shadowed by an earlier registry are reported once.
    pub fn search(&self, query: Option<&str>, category: Option<&str>) -> Vec<(IndexEntry, String)> {
        let query = query.map(str::to_lowercase);
        let mut seen = std::collections::HashSet::new();
        let mut results = Vec::new();

        for registry in &self.registries {
            for entry in registry.entries() {
                if !seen.insert(entry.name.clone()) {
                    continue;
                }
                if category.is_some_and(|c| !entry.category.eq_ignore_ascii_case(c)) {
                    continue;
                }
                if let Some(q) = &query {
                    let matches = entry.name.to_lowercase().contains(q)
                        || entry.description.to_lowercase().contains(q)
                        || entry.tags.iter().any(|t| t.to_lowercase().contains(q));
                    if !matches {
                        continue;
                    }
                }
                results.push((entry, registry.id().to_string()));
            }
        }

        results.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        results
    }
}

impl Registry for RegistrySet {
    fn find_pattern(&self, name: &str) -> Result<(IndexEntry, String)> {
        self.registries
            .iter()
            .find_map(|r| r.find_pattern(name).ok())
            .ok_or_else(|| GitopsiError::PatternNotFound {
                name: name.to_string(),
            })
    }

    fn fetch_pattern(&self, registry_id: &str, name: &str, version: &str) -> Result<Pattern> {
        let registry = self
            .registries
            .iter()
            .find(|r| r.id() == registry_id)
            .ok_or_else(|| GitopsiError::RegistryFailed {
                registry: registry_id.to_string(),
                reason: "registry is not configured".to_string(),
            })?;
        registry.fetch_pattern(registry_id, name, version)
    }

    fn entries(&self) -> Vec<IndexEntry> {
        self.search(None, None).into_iter().map(|(e, _)| e).collect()
    }
}

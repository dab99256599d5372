//! Registry index (index.yaml)
//!
//! The index summarizes a directory tree of `pattern.yaml` files: one entry
//! per pattern name with every version found, plus per-category counts.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Result, write_error};
use crate::pattern::validation::parse_version;
use crate::pattern::{PATTERN_FILE, Pattern};

/// Index file name written at the registry root
pub const INDEX_FILE: &str = "index.yaml";

/// Index format version
pub const INDEX_VERSION: &str = "1";

/// Registry index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub version: String,
    pub generated: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub patterns: Vec<IndexEntry>,
}

/// A category and how many patterns it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub count: usize,
}

/// Index entry for one pattern name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Versions in ascending order
    pub versions: Vec<String>,
    pub latest: String,
    #[serde(default)]
    pub author: String,
}

/// Compare two version strings, semver first, lexicographic otherwise
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Find and parse every `pattern.yaml` below `root`.
///
/// Files that fail to parse are skipped with a warning so one broken pattern
/// does not hide the rest of the registry.
pub fn scan_patterns(root: &Path) -> Vec<(PathBuf, Pattern)> {
    let mut found: Vec<(PathBuf, Pattern)> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == PATTERN_FILE)
        .filter_map(|e| match Pattern::from_file(e.path()) {
            Ok(pattern) => Some((e.path().to_path_buf(), pattern)),
            Err(err) => {
                tracing::warn!(path = %e.path().display(), error = %err, "skipping pattern");
                None
            }
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

impl RegistryIndex {
    /// Build an index from parsed patterns
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a Pattern>) -> Self {
        let mut by_name: BTreeMap<&str, Vec<&Pattern>> = BTreeMap::new();
        for pattern in patterns {
            by_name.entry(pattern.name()).or_default().push(pattern);
        }

        let mut entries = Vec::new();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for (name, mut versions) in by_name {
            versions.sort_by(|a, b| compare_versions(a.version(), b.version()));
            versions.dedup_by(|a, b| a.version() == b.version());
            let Some(newest) = versions.last() else {
                continue;
            };
            let meta = &newest.metadata;
            *counts.entry(newest.category_dir().to_string()).or_default() += 1;
            entries.push(IndexEntry {
                name: name.to_string(),
                description: meta.description.clone(),
                category: meta.category.clone(),
                tags: meta.tags.iter().cloned().collect(),
                versions: versions.iter().map(|p| p.version().to_string()).collect(),
                latest: meta.version.clone(),
                author: meta.author.clone(),
            });
        }

        Self {
            version: INDEX_VERSION.to_string(),
            generated: Utc::now(),
            categories: counts
                .into_iter()
                .map(|(name, count)| CategoryEntry {
                    name,
                    description: String::new(),
                    count,
                })
                .collect(),
            patterns: entries,
        }
    }

    /// Build the index for a registry directory
    pub fn build(root: &Path) -> Self {
        let scanned = scan_patterns(root);
        Self::from_patterns(scanned.iter().map(|(_, p)| p))
    }

    /// Build the index and write it to `<root>/index.yaml`
    pub fn write(root: &Path) -> Result<(PathBuf, Self)> {
        let index = Self::build(root);
        let path = root.join(INDEX_FILE);
        let yaml = serde_yaml::to_string(&index)?;
        std::fs::write(&path, yaml).map_err(|e| write_error(&path, &e))?;
        Ok((path, index))
    }

    pub fn find(&self, name: &str) -> Option<&IndexEntry> {
        self.patterns.iter().find(|e| e.name == name)
    }
}

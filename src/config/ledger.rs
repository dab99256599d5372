//! Install ledger (.gitopsi/patterns.yaml)
//!
//! The ledger records which patterns are installed, with the configuration,
//! environments and generated paths used at install time. Pattern names are
//! unique keys. A name in the ledger implies its generated files should
//! exist; `gitopsi status` reports patterns whose files went missing.
//!
//! ```yaml
//! version: "1"
//! updated: 2026-01-01T00:00:00Z
//! patterns:
//!   monitoring:
//!     pattern: { ... full pattern.yaml snapshot ... }
//!     installedAt: 2026-01-01T00:00:00Z
//!     config: { retention: 15d }
//!     environments: [dev]
//!     status: installed
//!     paths:
//!       - infrastructure/observability/monitoring/base/kustomization.yaml
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fslock::LockFile;
use serde::{Deserialize, Serialize};

use crate::error::{GitopsiError, Result, read_error, write_error};
use crate::pattern::{ConfigMap, Pattern};

/// Ledger file name inside `.gitopsi/`
pub const LEDGER_FILE: &str = "patterns.yaml";

/// Advisory lock file inside `.gitopsi/`
pub const LOCK_FILE: &str = ".lock";

/// Current ledger format version
pub const LEDGER_VERSION: &str = "1";

/// The persisted lifecycle state of a pattern.
///
/// Transitional states (installing, updating, uninstalling) only exist for
/// the duration of a single command and are never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    Installed,
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallStatus::Installed => f.write_str("installed"),
        }
    }
}

/// A pattern recorded in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPattern {
    /// Snapshot of the pattern at install time
    pub pattern: Pattern,

    pub installed_at: DateTime<Utc>,

    /// Configuration actually used (defaults merged with user values)
    #[serde(default)]
    pub config: ConfigMap,

    #[serde(default)]
    pub environments: Vec<String>,

    pub status: InstallStatus,

    /// Generated files, relative to the project root
    #[serde(default)]
    pub paths: Vec<String>,
}

impl InstalledPattern {
    pub fn version(&self) -> &str {
        self.pattern.version()
    }
}

/// The ledger as a whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub version: String,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub patterns: BTreeMap<String, InstalledPattern>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: LEDGER_VERSION.to_string(),
            updated: Utc::now(),
            patterns: BTreeMap::new(),
        }
    }
}

impl State {
    pub fn get(&self, name: &str) -> Option<&InstalledPattern> {
        self.patterns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Insert or replace a ledger entry
    pub fn record(&mut self, installed: InstalledPattern) -> Option<InstalledPattern> {
        self.patterns
            .insert(installed.pattern.name().to_string(), installed)
    }

    pub fn remove(&mut self, name: &str) -> Option<InstalledPattern> {
        self.patterns.remove(name)
    }
}

/// Loads and saves the ledger for one project
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

/// RAII guard for the ledger lock
///
/// Acquires an advisory file lock on creation and releases it on drop.
#[derive(Debug)]
pub struct StateGuard {
    lock: LockFile,
}

impl Drop for StateGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}

impl StateStore {
    /// Create a store for the given `.gitopsi` directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    /// Load the ledger; a missing file is an empty ledger
    pub fn load(&self) -> Result<State> {
        let path = self.path();
        if !path.exists() {
            return Ok(State::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| read_error(&path, &e))?;
        if content.trim().is_empty() {
            return Ok(State::default());
        }

        serde_yaml::from_str(&content).map_err(|e| GitopsiError::StateParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Stamp and save the ledger, replacing the file atomically
    pub fn save(&self, state: &mut State) -> Result<()> {
        state.updated = Utc::now();
        let yaml = serde_yaml::to_string(state)?;

        fs::create_dir_all(&self.dir).map_err(|e| write_error(&self.dir, &e))?;
        let path = self.path();

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| write_error(&path, &e))?;
        tmp.write_all(yaml.as_bytes())
            .map_err(|e| write_error(&path, &e))?;
        tmp.persist(&path)
            .map_err(|e| write_error(&path, &e.error))?;

        tracing::debug!(path = %path.display(), patterns = state.patterns.len(), "ledger saved");
        Ok(())
    }

    /// Acquire the ledger lock, blocking until it is free
    pub fn lock(&self) -> Result<StateGuard> {
        fs::create_dir_all(&self.dir).map_err(|e| write_error(&self.dir, &e))?;
        let lock_path = self.dir.join(LOCK_FILE);
        let mut lock = LockFile::open(&lock_path).map_err(|e| lock_error(&lock_path, &e))?;
        lock.lock().map_err(|e| lock_error(&lock_path, &e))?;
        Ok(StateGuard { lock })
    }

    /// Run a load-modify-save cycle under the ledger lock
    pub fn update<T>(&self, f: impl FnOnce(&mut State) -> T) -> Result<T> {
        let _guard = self.lock()?;
        let mut state = self.load()?;
        let out = f(&mut state);
        self.save(&mut state)?;
        Ok(out)
    }
}

fn lock_error(path: &Path, e: &std::io::Error) -> GitopsiError {
    GitopsiError::LockFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

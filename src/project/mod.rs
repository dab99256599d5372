//! GitOps project handling
//!
//! A project is any directory patterns are generated into. Its bookkeeping
//! lives in a hidden directory at the root:
//!
//! ```text
//! .gitopsi/
//! ├── config.yaml    # Project settings (optional)
//! ├── patterns.yaml  # Install ledger
//! └── .lock          # Advisory lock file
//! ```
//!
//! Nothing is created until the first install records a pattern.

use std::path::{Path, PathBuf};

use crate::config::{Settings, StateStore};
use crate::error::Result;
use crate::generator::Generator;
use crate::registry::{LocalRegistry, RegistrySet};

/// Project bookkeeping directory name
pub const GITOPSI_DIR: &str = ".gitopsi";

/// A GitOps repository patterns are installed into
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory; generated paths are relative to it
    pub root: PathBuf,

    /// Path to the .gitopsi directory
    pub gitopsi_dir: PathBuf,

    pub settings: Settings,

    pub store: StateStore,
}

impl Project {
    /// Whether a project has been initialized at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(GITOPSI_DIR).is_dir()
    }

    /// Find a project by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start.ancestors().find(|dir| Self::exists(dir)).map(Path::to_path_buf)
    }

    /// Open a project rooted at `root`, loading its settings
    pub fn open(root: &Path) -> Result<Self> {
        let gitopsi_dir = root.join(GITOPSI_DIR);
        let settings = Settings::load(&gitopsi_dir)?;
        tracing::debug!(
            root = %root.display(),
            tool = %settings.gitops_tool,
            platform = %settings.platform,
            "opened project"
        );

        Ok(Self {
            root: root.to_path_buf(),
            store: StateStore::new(&gitopsi_dir),
            gitopsi_dir,
            settings,
        })
    }

    /// Build the registry set from settings and an optional CLI registry
    pub fn registries(&self, cli_registry: Option<&Path>) -> RegistrySet {
        let mut set = RegistrySet::new();
        for source in self.settings.resolved_registries(&self.root, cli_registry) {
            set.push(LocalRegistry::open(source.name, source.path));
        }
        set
    }

    /// Generator configured for this project's GitOps tool
    pub fn generator(&self) -> Generator {
        Generator::new(self.settings.gitops_tool, self.settings.repo_url.clone())
    }
}

//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - update: Update command arguments
//! - list: List and status arguments
//! - inspect: Dependency tree and conflict arguments
//! - search: Registry search arguments
//! - authoring: Validate, scaffold and index arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod authoring;
pub mod completions;
pub mod inspect;
pub mod install;
pub mod list;
pub mod search;
pub mod uninstall;
pub mod update;

pub use authoring::{IndexArgs, ScaffoldArgs, ValidateArgs};
pub use completions::CompletionsArgs;
pub use inspect::{ConflictsArgs, DepsArgs};
pub use install::InstallArgs;
pub use list::{ListArgs, StatusArgs};
pub use search::SearchArgs;
pub use uninstall::UninstallArgs;
pub use update::UpdateArgs;

/// gitopsi - GitOps pattern installer
///
/// Install reusable infrastructure patterns into a GitOps repository.
#[derive(Parser, Debug)]
#[command(
    name = "gitopsi",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Pattern installer for GitOps repositories",
    long_about = "gitopsi installs versioned infrastructure patterns (Helm charts, Kustomize \
                  bases, manifests) into a GitOps repository, generating Kustomize bases, \
                  per-environment overlays and ArgoCD or Flux applications.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  gitopsi install monitoring --env dev --env prod \x1b[90m# Install for two environments\x1b[0m\n   \
                  gitopsi install monitoring --dry-run            \x1b[90m# Show the files that would be generated\x1b[0m\n   \
                  gitopsi update monitoring                       \x1b[90m# Move to the latest version\x1b[0m\n   \
                  gitopsi uninstall monitoring                    \x1b[90m# Remove generated files\x1b[0m\n   \
                  gitopsi list                                    \x1b[90m# List installed patterns\x1b[0m\n   \
                  gitopsi search observability                    \x1b[90m# Search the registries\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Project directory (defaults to the nearest directory containing .gitopsi, else the current directory)
    #[arg(long, short = 'p', global = true, env = "GITOPSI_PROJECT")]
    pub project: Option<PathBuf>,

    /// Pattern registry directory, searched before configured registries
    #[arg(long, short = 'r', global = true, env = "GITOPSI_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a pattern and its dependencies
    Install(InstallArgs),

    /// Remove an installed pattern
    Uninstall(UninstallArgs),

    /// Update an installed pattern to another version
    Update(UpdateArgs),

    /// List installed patterns
    List(ListArgs),

    /// Check the generated files of an installed pattern
    Status(StatusArgs),

    /// Show the dependency tree of a pattern
    Deps(DepsArgs),

    /// Check a pattern for conflicts with installed patterns
    Conflicts(ConflictsArgs),

    /// List installed patterns with newer versions available
    Outdated,

    /// Search the configured registries
    Search(SearchArgs),

    /// Validate a pattern definition
    Validate(ValidateArgs),

    /// Create a new pattern skeleton
    Scaffold(ScaffoldArgs),

    /// Build the index of a registry directory
    Index(IndexArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

use clap::Parser;

use crate::installer::{DEFAULT_ENVIRONMENT, InstallOptions};

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install the latest version for dev:\n    gitopsi install monitoring\n\n\
                   Install a specific version:\n    gitopsi install monitoring --version 1.0.0\n\n\
                   Install for several environments:\n    gitopsi install monitoring --env dev --env prod\n\n\
                   Override configuration:\n    gitopsi install monitoring --set retention=30d --set replicas=2\n\n\
                   Preview generated files:\n    gitopsi install monitoring --dry-run")]
pub struct InstallArgs {
    /// Pattern name
    pub name: String,

    /// Exact version to install (defaults to latest)
    #[arg(long = "version", value_name = "VERSION")]
    pub pattern_version: Option<String>,

    /// Environment to generate an overlay and application for (repeatable)
    #[arg(long = "env", short = 'e', value_name = "ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub environments: Vec<String>,

    /// Configuration override as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Reinstall even if already installed
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Do not install dependencies
    #[arg(long)]
    pub skip_deps: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            version: args.pattern_version.clone().unwrap_or_default(),
            overrides: args.set.clone(),
            environments: args.environments.clone(),
            dry_run: args.dry_run,
            force: args.force,
            skip_deps: args.skip_deps,
            auto_approve: args.yes,
            ..InstallOptions::default()
        }
    }
}

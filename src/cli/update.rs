use clap::Parser;

use crate::installer::UpdateOptions;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Update to the latest version:\n    gitopsi update monitoring\n\n\
                  Move to a specific version:\n    gitopsi update monitoring --version 1.1.0\n\n\
                  Regenerate files at the current version:\n    gitopsi update monitoring --force")]
pub struct UpdateArgs {
    /// Pattern name
    pub name: String,

    /// Target version (defaults to latest)
    #[arg(long = "version", value_name = "VERSION")]
    pub pattern_version: Option<String>,

    /// Reinstall even when already at the target version
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl From<&UpdateArgs> for UpdateOptions {
    fn from(args: &UpdateArgs) -> Self {
        Self {
            version: args.pattern_version.clone().unwrap_or_default(),
            force: args.force,
            dry_run: args.dry_run,
            auto_approve: args.yes,
        }
    }
}

use clap::Parser;

use crate::installer::UninstallOptions;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a pattern and its files:\n    gitopsi uninstall monitoring\n\n\
                  Forget a pattern but keep its files:\n    gitopsi uninstall monitoring --keep-files\n\n\
                  Skip confirmation:\n    gitopsi uninstall monitoring -y")]
pub struct UninstallArgs {
    /// Pattern name
    pub name: String,

    /// Remove the ledger entry but leave generated files in place
    #[arg(long)]
    pub keep_files: bool,

    /// Continue when a file cannot be removed
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl From<&UninstallArgs> for UninstallOptions {
    fn from(args: &UninstallArgs) -> Self {
        Self {
            keep_files: args.keep_files,
            force: args.force,
            auto_approve: args.yes,
        }
    }
}

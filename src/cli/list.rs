use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List installed patterns:\n    gitopsi list\n\n\
                  Machine-readable output:\n    gitopsi list --json")]
pub struct ListArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check that generated files still exist:\n    gitopsi status monitoring\n\n\
                  Machine-readable output:\n    gitopsi status monitoring --json")]
pub struct StatusArgs {
    /// Pattern name
    pub name: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate a pattern directory:\n    gitopsi validate ./patterns/monitoring\n\n\
                  Validate a file:\n    gitopsi validate ./patterns/monitoring/pattern.yaml")]
pub struct ValidateArgs {
    /// Pattern directory or pattern.yaml file
    pub path: PathBuf,
}

/// Arguments for the scaffold command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create ./my-pattern/pattern.yaml:\n    gitopsi scaffold my-pattern\n\n\
                  Create it in a registry checkout:\n    gitopsi scaffold loki --category observability --dir ./patterns")]
pub struct ScaffoldArgs {
    /// Pattern name
    pub name: String,

    /// Pattern category
    #[arg(long, short = 'c', default_value = crate::pattern::DEFAULT_CATEGORY)]
    pub category: String,

    /// Parent directory (defaults to the current directory)
    #[arg(long, short = 'd')]
    pub dir: Option<PathBuf>,
}

/// Arguments for the index command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Write ./patterns/index.yaml:\n    gitopsi index ./patterns")]
pub struct IndexArgs {
    /// Registry directory
    pub dir: PathBuf,
}

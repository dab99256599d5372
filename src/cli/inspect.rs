use clap::Parser;

/// Arguments for the deps command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show what a pattern pulls in:\n    gitopsi deps ingress")]
pub struct DepsArgs {
    /// Pattern name
    pub name: String,
}

/// Arguments for the conflicts command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check before installing:\n    gitopsi conflicts grafana")]
pub struct ConflictsArgs {
    /// Pattern name
    pub name: String,
}

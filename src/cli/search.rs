use clap::Parser;

/// Arguments for the search command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List every available pattern:\n    gitopsi search\n\n\
                  Search names, descriptions and tags:\n    gitopsi search prometheus\n\n\
                  Restrict to a category:\n    gitopsi search --category security")]
pub struct SearchArgs {
    /// Text to match against names, descriptions and tags
    pub query: Option<String>,

    /// Only show patterns in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

//! gitopsi - GitOps pattern installer
//!
//! Command line entry point: parses arguments, sets up logging and runs the
//! selected command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitopsi::cli::Cli;
use gitopsi::commands;

/// Log filter: `RUST_LOG` wins, then `-v`, then warnings only
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "gitopsi=debug" } else { "gitopsi=warn" })
    })
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.global.verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = commands::dispatch(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

//! Command implementations for the gitopsi CLI

pub mod authoring;
pub mod completions;
pub mod helpers;
pub mod inspect;
pub mod install;
pub mod list;
pub mod search;
pub mod uninstall;
pub mod update;
pub mod version;

use crate::cli::{Cli, Commands};
use crate::error::Result;

/// Dispatch a parsed command line
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Install(args) => install::run(&global, args),
        Commands::Uninstall(args) => uninstall::run(&global, args),
        Commands::Update(args) => update::run(&global, args),
        Commands::List(args) => list::run(&global, args),
        Commands::Status(args) => list::status(&global, args),
        Commands::Deps(args) => inspect::deps(&global, args),
        Commands::Conflicts(args) => inspect::conflicts(&global, args),
        Commands::Outdated => inspect::outdated(&global),
        Commands::Search(args) => search::run(&global, args),
        Commands::Validate(args) => authoring::validate(args),
        Commands::Scaffold(args) => authoring::scaffold(args),
        Commands::Index(args) => authoring::index(args),
        Commands::Version => version::run(),
        Commands::Completions(args) => completions::run(args),
    }
}

//! Update command implementation

use crate::cli::{GlobalArgs, UpdateArgs};
use crate::commands::helpers::{confirm, open};
use crate::commands::install::print_result;
use crate::error::Result;
use crate::installer::{Installer, UpdateOptions};

/// Run update command
pub fn run(global: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let installer = Installer::new(&project, &registries);
    let options = UpdateOptions::from(&args);

    if !options.dry_run && !options.auto_approve {
        let target = options.version.as_str();
        let prompt = if target.is_empty() {
            format!("Update '{}' to the latest version?", args.name)
        } else {
            format!("Update '{}' to {target}?", args.name)
        };
        if !confirm(&prompt, false)? {
            println!("Update cancelled.");
            return Ok(());
        }
    }

    let result = installer.update(&args.name, &options)?;
    print_result(&result, options.dry_run);
    Ok(())
}

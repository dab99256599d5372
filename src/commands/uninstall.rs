//! Uninstall command implementation

use console::Style;

use crate::cli::{GlobalArgs, UninstallArgs};
use crate::commands::helpers::{confirm, open, print_paths, print_warnings};
use crate::error::{GitopsiError, Result};
use crate::installer::{Installer, UninstallOptions};

/// Run uninstall command
pub fn run(global: &GlobalArgs, args: UninstallArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let installer = Installer::new(&project, &registries);
    let options = UninstallOptions::from(&args);

    let state = project.store.load()?;
    let installed = state.get(&args.name).ok_or_else(|| GitopsiError::NotInstalled {
        name: args.name.clone(),
    })?;

    let prompt = if options.keep_files {
        format!("Forget '{}' and keep its files?", args.name)
    } else {
        format!(
            "Uninstall '{}' and remove {} file(s)?",
            args.name,
            installed.paths.len()
        )
    };
    if !confirm(&prompt, options.auto_approve)? {
        println!("Uninstall cancelled.");
        return Ok(());
    }

    let result = installer.uninstall(&args.name, &options)?;
    print_warnings(&result.warnings);
    println!(
        "{}",
        Style::new()
            .green()
            .bold()
            .apply_to(format!("Uninstalled {}", args.name))
    );
    print_paths("Removed files:", &result.removed);
    Ok(())
}

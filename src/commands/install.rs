//! Install command implementation
//!
//! Shows what will happen, asks for confirmation and hands over to the
//! installer. A dry run only prints the planned files.

use console::Style;

use crate::cli::{GlobalArgs, InstallArgs};
use crate::commands::helpers::{confirm, open, print_paths, print_warnings};
use crate::error::Result;
use crate::installer::{DependencyStatus, InstallOptions, InstallResult, Installer};

/// Run install command
pub fn run(global: &GlobalArgs, args: InstallArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let installer = Installer::new(&project, &registries);
    let options = InstallOptions::from(&args);

    if !options.dry_run && !options.auto_approve {
        let prompt = format!(
            "Install '{}' for {} into {}?",
            args.name,
            options.environments.join(", "),
            project.root.display()
        );
        if !confirm(&prompt, false)? {
            println!("Install cancelled.");
            return Ok(());
        }
    }

    let result = installer.install(&args.name, &options)?;
    print_result(&result, options.dry_run);
    Ok(())
}

pub(crate) fn print_result(result: &InstallResult, dry_run: bool) {
    for dep in &result.dependencies {
        let style = match dep.status {
            DependencyStatus::Failed => Style::new().red(),
            DependencyStatus::Skipped => Style::new().dim(),
            DependencyStatus::Installed | DependencyStatus::Planned => Style::new().green(),
        };
        println!(
            "  {} {} {} {}",
            style.apply_to(dep.status),
            dep.name,
            dep.version,
            Style::new().dim().apply_to(&dep.message)
        );
    }

    print_warnings(&result.warnings);

    if result.success {
        println!("{}", Style::new().green().bold().apply_to(&result.message));
    } else {
        println!("{}", Style::new().yellow().apply_to(&result.message));
    }

    let heading = if dry_run {
        "Files that would be generated:"
    } else {
        "Generated files:"
    };
    print_paths(heading, &result.generated_paths);
}

//! List and status command implementations

use console::Style;
use serde::Serialize;

use crate::cli::{GlobalArgs, ListArgs, StatusArgs};
use crate::commands::helpers::{open, print_json};
use crate::config::InstalledPattern;
use crate::error::Result;
use crate::installer::{Health, Installer};

/// One row of `gitopsi list --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry<'a> {
    name: &'a str,
    version: &'a str,
    category: &'a str,
    environments: &'a [String],
    installed_at: String,
    files: usize,
}

impl<'a> From<&'a InstalledPattern> for ListEntry<'a> {
    fn from(installed: &'a InstalledPattern) -> Self {
        Self {
            name: installed.pattern.name(),
            version: installed.version(),
            category: installed.pattern.category_dir(),
            environments: &installed.environments,
            installed_at: installed.installed_at.to_rfc3339(),
            files: installed.paths.len(),
        }
    }
}

/// Run list command
pub fn run(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let installed = Installer::new(&project, &registries).list()?;

    if args.json {
        let entries: Vec<ListEntry<'_>> = installed.iter().map(ListEntry::from).collect();
        return print_json(&entries);
    }

    if installed.is_empty() {
        println!("No patterns installed.");
        return Ok(());
    }

    println!("Installed patterns ({}):", installed.len());
    println!();
    for pattern in &installed {
        let entry = ListEntry::from(pattern);
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(entry.name),
            entry.version
        );
        if !pattern.pattern.metadata.description.is_empty() {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Description:"),
                pattern.pattern.metadata.description
            );
        }
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Environments:"),
            entry.environments.join(", ")
        );
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Files:"),
            entry.files
        );
    }

    Ok(())
}

/// Run status command
pub fn status(global: &GlobalArgs, args: StatusArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let status = Installer::new(&project, &registries).status(&args.name)?;

    if args.json {
        return print_json(&status);
    }

    let health = match status.health {
        Health::Healthy => Style::new().green().bold(),
        Health::Degraded => Style::new().red().bold(),
    };
    println!(
        "{} {} {}",
        Style::new().bold().yellow().apply_to(&status.name),
        status.version,
        health.apply_to(status.health)
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Installed:"),
        status.installed_at.to_rfc3339()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Environments:"),
        status.environments.join(", ")
    );
    println!(
        "  {} {}/{} present",
        Style::new().bold().apply_to("Files:"),
        status.paths.len() - status.missing.len(),
        status.paths.len()
    );
    for missing in &status.missing {
        println!("    {} {missing}", Style::new().red().apply_to("missing"));
    }

    Ok(())
}

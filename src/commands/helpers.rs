//! Command helper utilities

use std::path::PathBuf;

use console::Style;
use inquire::Confirm;

use crate::cli::GlobalArgs;
use crate::error::{GitopsiError, Result};
use crate::project::Project;
use crate::registry::RegistrySet;

/// Resolve the project root.
///
/// An explicit path wins. Otherwise the nearest ancestor of the current
/// directory holding `.gitopsi/` is used, falling back to the current
/// directory itself.
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = project {
        return Ok(path);
    }
    let current = std::env::current_dir().map_err(|e| GitopsiError::IoError {
        message: format!("Failed to get current directory: {e}"),
    })?;
    Ok(Project::find_from(&current).unwrap_or(current))
}

/// Open the project and its registries
pub fn open(global: &GlobalArgs) -> Result<(Project, RegistrySet)> {
    let root = resolve_project_path(global.project.clone())?;
    let project = Project::open(&root)?;
    let registries = project.registries(global.registry.as_deref());
    Ok((project, registries))
}

/// Ask for confirmation unless `yes` is set or stdin is not a terminal
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes || !console::user_attended() {
        return Ok(true);
    }
    Confirm::new(prompt)
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()
        .map_err(|e| GitopsiError::IoError {
            message: format!("Failed to read confirmation: {e}"),
        })
}

/// Print warnings in yellow
pub fn print_warnings(warnings: &[String]) {
    let style = Style::new().yellow();
    for warning in warnings {
        println!("{} {warning}", style.apply_to("warning:"));
    }
}

/// Print a list of project-relative paths under a heading
pub fn print_paths(heading: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    println!("{}", Style::new().bold().apply_to(heading));
    for path in paths {
        println!("  {path}");
    }
}

/// Serialize a value as pretty JSON to stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

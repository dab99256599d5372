//! Pattern authoring commands: validate, scaffold, index

use console::Style;

use crate::cli::{IndexArgs, ScaffoldArgs, ValidateArgs};
use crate::error::{GitopsiError, Result};
use crate::pattern::scaffold::scaffold_pattern;
use crate::pattern::validation::validate_pattern_file;
use crate::registry::RegistryIndex;

/// Run validate command
pub fn validate(args: ValidateArgs) -> Result<()> {
    let pattern = validate_pattern_file(&args.path)?;
    println!(
        "{} {} {}",
        Style::new().green().bold().apply_to("valid"),
        pattern.name(),
        pattern.version()
    );
    Ok(())
}

/// Run scaffold command
pub fn scaffold(args: ScaffoldArgs) -> Result<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| GitopsiError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };
    let file = scaffold_pattern(&dir, &args.name, &args.category)?;
    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Created"),
        file.display()
    );
    Ok(())
}

/// Run index command
pub fn index(args: IndexArgs) -> Result<()> {
    let (path, index) = RegistryIndex::write(&args.dir)?;
    println!(
        "{} {} ({} patterns, {} categories)",
        Style::new().green().bold().apply_to("Wrote"),
        path.display(),
        index.patterns.len(),
        index.categories.len()
    );
    Ok(())
}

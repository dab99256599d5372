//! Search command implementation

use console::Style;

use crate::cli::{GlobalArgs, SearchArgs};
use crate::commands::helpers::open;
use crate::error::Result;

/// Run search command
pub fn run(global: &GlobalArgs, args: SearchArgs) -> Result<()> {
    let (_, registries) = open(global)?;
    let found = registries.search(args.query.as_deref(), args.category.as_deref());

    if found.is_empty() {
        println!("No patterns found.");
        return Ok(());
    }

    for (entry, registry) in &found {
        println!(
            "{} {} {}",
            Style::new().bold().yellow().apply_to(&entry.name),
            entry.latest,
            Style::new().dim().apply_to(format!("[{}] ({registry})", entry.category))
        );
        if !entry.description.is_empty() {
            println!("  {}", entry.description);
        }
    }
    Ok(())
}

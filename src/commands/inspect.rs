//! Read-only registry queries: deps, conflicts, outdated

use std::collections::{BTreeMap, BTreeSet};

use console::Style;

use crate::cli::{ConflictsArgs, DepsArgs, GlobalArgs};
use crate::commands::helpers::open;
use crate::error::Result;
use crate::installer::Installer;

/// Run deps command
pub fn deps(global: &GlobalArgs, args: DepsArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let tree = Installer::new(&project, &registries).dependency_tree(&args.name)?;

    println!("{}", Style::new().bold().yellow().apply_to(&args.name));
    let mut seen = BTreeSet::new();
    print_children(&tree, &args.name, 1, &mut seen);
    Ok(())
}

fn print_children(
    tree: &BTreeMap<String, Vec<String>>,
    name: &str,
    depth: usize,
    seen: &mut BTreeSet<String>,
) {
    let Some(children) = tree.get(name) else {
        return;
    };
    for child in children {
        let indent = "  ".repeat(depth);
        if seen.insert(child.clone()) {
            println!("{indent}└─ {child}");
            print_children(tree, child, depth + 1, seen);
        } else {
            println!("{indent}└─ {child} {}", Style::new().dim().apply_to("(see above)"));
        }
    }
}

/// Run conflicts command
pub fn conflicts(global: &GlobalArgs, args: ConflictsArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let conflicts = Installer::new(&project, &registries).conflict_check(&args.name)?;

    if conflicts.is_empty() {
        println!(
            "{}",
            Style::new()
                .green()
                .apply_to(format!("No conflicts for '{}'", args.name))
        );
        return Ok(());
    }

    println!("Conflicts for '{}' ({}):", args.name, conflicts.len());
    for conflict in &conflicts {
        println!("  {} {conflict}", Style::new().yellow().apply_to("!"));
    }
    Ok(())
}

/// Run outdated command
pub fn outdated(global: &GlobalArgs) -> Result<()> {
    let (project, registries) = open(global)?;
    let installer = Installer::new(&project, &registries);
    let updates = installer.check_updates()?;

    if updates.is_empty() {
        println!("All installed patterns are up to date.");
        return Ok(());
    }

    let state = project.store.load()?;
    println!("Updates available ({}):", updates.len());
    for (name, latest) in &updates {
        let current = state.get(name).map_or("?", |p| p.version());
        println!(
            "  {} {current} → {}",
            Style::new().bold().yellow().apply_to(name),
            Style::new().green().apply_to(latest)
        );
    }
    Ok(())
}

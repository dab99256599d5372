//! Dependency chains and trees

use std::collections::BTreeMap;

use crate::error::{GitopsiError, Result};
use crate::registry::Registry;

/// Fail if `name` is already on the chain of patterns being processed
pub(crate) fn check_cycle(chain: &[String], name: &str) -> Result<()> {
    match chain.iter().position(|n| n == name) {
        Some(start) => {
            let mut cycle: Vec<&str> = chain[start..].iter().map(String::as_str).collect();
            cycle.push(name);
            Err(GitopsiError::CycleDetected {
                chain: cycle.join(" -> "),
            })
        }
        None => Ok(()),
    }
}

/// Build a flat `name -> [direct dependencies]` map from latest versions
pub fn dependency_tree(registry: &dyn Registry, name: &str) -> Result<BTreeMap<String, Vec<String>>> {
    let mut tree = BTreeMap::new();
    let mut chain = Vec::new();
    visit(registry, name, false, &mut chain, &mut tree)?;
    Ok(tree)
}

fn visit(
    registry: &dyn Registry,
    name: &str,
    optional: bool,
    chain: &mut Vec<String>,
    tree: &mut BTreeMap<String, Vec<String>>,
) -> Result<()> {
    check_cycle(chain, name)?;
    if tree.contains_key(name) {
        return Ok(());
    }

    let pattern = match registry
        .find_pattern(name)
        .and_then(|(_, id)| registry.fetch_pattern(&id, name, ""))
    {
        Ok(pattern) => pattern,
        Err(e) if optional => {
            tracing::debug!(pattern = %name, error = %e, "optional dependency unavailable");
            tree.insert(name.to_string(), Vec::new());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let deps = &pattern.spec.dependencies;
    tree.insert(
        name.to_string(),
        deps.iter().map(|d| d.name.clone()).collect(),
    );

    chain.push(name.to_string());
    for dep in deps {
        visit(registry, &dep.name, dep.optional, chain, tree)?;
    }
    chain.pop();
    Ok(())
}

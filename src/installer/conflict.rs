//! Namespace and component-name conflicts between patterns
//!
//! Conflicts are advisory. They are returned as messages for the caller to
//! act on and never abort an operation.

use crate::config::State;
use crate::pattern::Pattern;

/// Compare a candidate pattern with every installed pattern except itself
pub fn find_conflicts(candidate: &Pattern, state: &State) -> Vec<String> {
    let mut conflicts = Vec::new();

    for (installed_name, installed) in &state.patterns {
        if installed_name == candidate.name() {
            continue;
        }
        let others = &installed.pattern.spec.components;

        for component in &candidate.spec.components {
            if let Some(namespace) = component.namespace.as_deref() {
                for other in others
                    .iter()
                    .filter(|o| o.namespace.as_deref() == Some(namespace))
                {
                    conflicts.push(format!(
                        "namespace '{namespace}' of component '{}' is also used by component '{}' of pattern '{installed_name}'",
                        component.name, other.name
                    ));
                }
            }

            if others.iter().any(|o| o.name == component.name) {
                conflicts.push(format!(
                    "component '{}' is already defined by pattern '{installed_name}'",
                    component.name
                ));
            }
        }
    }

    conflicts
}

/// First planned path already recorded by another installed pattern, as
/// `(path, owner)`
pub fn find_path_collision<'a>(
    name: &str,
    planned: &'a [String],
    state: &'a State,
) -> Option<(&'a str, &'a str)> {
    state
        .patterns
        .iter()
        .filter(|(owner, _)| owner.as_str() != name)
        .find_map(|(owner, installed)| {
            planned
                .iter()
                .find(|path| installed.paths.contains(path))
                .map(|path| (path.as_str(), owner.as_str()))
        })
}

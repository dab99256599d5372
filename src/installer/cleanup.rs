//! Removal of generated files

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{GitopsiError, Result};

/// Remove project-relative files.
///
/// Files that are already gone are skipped. Any other failure aborts, unless
/// `force` is set, in which case it becomes a warning. Returns the removed
/// paths and the warnings.
pub fn remove_files(root: &Path, paths: &[String], force: bool) -> Result<(Vec<String>, Vec<String>)> {
    let mut removed = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        let full = root.join(path);
        match fs::remove_file(&full) {
            Ok(()) => {
                tracing::debug!(path = %path, "removed");
                removed.push(path.clone());
                prune_empty_parents(root, &full);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path, "already gone");
            }
            Err(e) if force => {
                tracing::warn!(path = %path, error = %e, "could not remove file");
                warnings.push(format!("Could not remove {path}: {e}"));
            }
            Err(e) => {
                return Err(GitopsiError::FileRemoveFailed {
                    path: full.display().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((removed, warnings))
}

/// Remove directories left empty above `file`, stopping at `root`
fn prune_empty_parents(root: &Path, file: &Path) {
    for dir in file.ancestors().skip(1) {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        // remove_dir refuses non-empty directories
        if fs::remove_dir(dir).is_err() {
            break;
        }
    }
}

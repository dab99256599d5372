//! Pattern registries
//!
//! A registry resolves a pattern name to an index entry and fetches concrete
//! pattern versions. The installer only talks to the [`Registry`] trait:
//!
//! - [`LocalRegistry`]: a directory tree of `pattern.yaml` files
//! - [`RegistrySet`]: several registries searched in order

pub mod index;
pub mod local;
pub mod set;

use crate::error::Result;
use crate::pattern::Pattern;

pub use index::{CategoryEntry, INDEX_FILE, IndexEntry, RegistryIndex};
pub use local::LocalRegistry;
pub use set::RegistrySet;

/// Source of patterns
pub trait Registry {
    /// Look up a pattern by name.
    ///
    /// Returns the index entry and the id of the registry that holds it; the
    /// id is passed back to [`Registry::fetch_pattern`].
    fn find_pattern(&self, name: &str) -> Result<(IndexEntry, String)>;

    /// Fetch a pattern version; an empty version means latest
    fn fetch_pattern(&self, registry_id: &str, name: &str, version: &str) -> Result<Pattern>;

    /// All index entries this registry knows about
    fn entries(&self) -> Vec<IndexEntry>;
}

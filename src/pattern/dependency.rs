//! Dependency declarations between patterns

use serde::{Deserialize, Serialize};

/// Reference to another pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,

    /// Exact version; empty means latest
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Failure to install an optional dependency does not block its dependent
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl Dependency {
    pub fn required(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            optional: true,
        }
    }
}

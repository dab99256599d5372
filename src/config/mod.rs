//! Configuration file handling for gitopsi
//!
//! This module contains data structures for:
//! - `.gitopsi/patterns.yaml` - Install ledger
//! - `.gitopsi/config.yaml` - Project settings

pub mod ledger;
pub mod settings;

// Re-export commonly used types
pub use ledger::{InstallStatus, InstalledPattern, LEDGER_VERSION, State, StateStore};
pub use settings::{GitOpsTool, RegistrySource, Settings};

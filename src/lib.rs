//! gitopsi - GitOps pattern installer
//!
//! Installs reusable, versioned infrastructure patterns into a GitOps
//! repository. A pattern is fetched from a registry, its dependencies are
//! installed first, its configuration is merged and validated, and its
//! Kustomize bases, overlays and ArgoCD or Flux applications are generated.
//! Installed patterns are tracked in `.gitopsi/patterns.yaml`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod installer;
pub mod pattern;
pub mod project;
pub mod registry;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_fixtures;

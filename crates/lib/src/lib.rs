//! winalias-lib: App Paths alias management
//!
//! This crate provides the pieces behind the `winalias` CLI:
//! - `AliasStore`: list, read, create, update and delete aliases in either scope
//! - `Registry`: the registry accessor the store is built on, with native,
//!   in-memory and file-backed implementations
//! - `platform`: elevation detection and data directories

pub mod alias;
pub mod consts;
pub mod platform;
pub mod registry;

pub use alias::{AliasEntry, AliasError, AliasStore, Scope};
pub use registry::{Registry, RegistryError};

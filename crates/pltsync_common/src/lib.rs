//! Shared foundational types used across the pltsync workspace.
//!
//! This crate provides the module identifiers and origins reported by the
//! runtime's module registry, along with the [`ModuleRegistry`] trait and its
//! in-memory and code-path-scanning implementations.

#![warn(missing_docs)]

pub mod module;
pub mod registry;

pub use module::{LoadedModule, ModuleName, Origin, BEAM_EXT};
pub use registry::{CodePathRegistry, ModuleRegistry, StaticRegistry};

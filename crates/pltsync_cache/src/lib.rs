//! Incremental PLT synchronization and checking.
//!
//! This crate keeps a persisted lookup table consistent with the set of
//! project-owned compiled modules and checks modules against it:
//!
//! 1. [`classify`] the loaded modules into project-owned object files
//! 2. [`PltDiff`] those against the files the PLT already records
//! 3. [`synchronize`] the PLT by building it or applying the diff
//! 4. [`check`] the selected modules against the synchronized PLT
//!
//! [`run`] ties the stages together under a [`PltLock`], then filters and
//! formats the findings.

#![warn(missing_docs)]

pub mod check;
pub mod classify;
pub mod diff;
pub mod error;
pub mod lock;
pub mod pipeline;
pub mod sync;

pub use check::{check, check_files};
pub use classify::{classify, ClassifyOptions};
pub use diff::PltDiff;
pub use error::{CacheError, Stage};
pub use lock::PltLock;
pub use pipeline::{run, run_sync, RunOptions};
pub use sync::{synchronize, SyncOutcome};

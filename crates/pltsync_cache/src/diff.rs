//! Difference between the live project files and a PLT's recorded files.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Files to add to and remove from a PLT so that it covers exactly the
/// live project files.
///
/// The two sets are always disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PltDiff {
    /// Live files the PLT does not record yet.
    pub to_add: BTreeSet<PathBuf>,
    /// Recorded files that are no longer live.
    pub to_remove: BTreeSet<PathBuf>,
}

impl PltDiff {
    /// Computes `live − recorded` and `recorded − live`.
    pub fn between(live: &BTreeSet<PathBuf>, recorded: &BTreeSet<PathBuf>) -> Self {
        Self {
            to_add: live.difference(recorded).cloned().collect(),
            to_remove: recorded.difference(live).cloned().collect(),
        }
    }

    /// Returns `true` if the PLT is already up to date.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

//! Caller-supplied module selection and record filtering.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use pltsync_common::ModuleName;

use crate::record::DiagnosticRecord;

/// Which modules a caller wants diagnostics for.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Selector {
    /// Every module.
    All,
    /// Only the named modules.
    Modules(BTreeSet<ModuleName>),
}

impl Selector {
    /// Creates an explicit selector from module names.
    pub fn modules<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ModuleName>,
    {
        Selector::Modules(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if `module` is selected.
    pub fn contains(&self, module: &ModuleName) -> bool {
        match self {
            Selector::All => true,
            Selector::Modules(set) => set.contains(module),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Modules(set) => {
                let names: Vec<&str> = set.iter().map(ModuleName::as_str).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

/// Error returned when a selector string contains an empty module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectorError(String);

impl fmt::Display for ParseSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid module selector '{}': empty module name", self.0)
    }
}

impl std::error::Error for ParseSelectorError {}

impl FromStr for Selector {
    type Err = ParseSelectorError;

    /// Parses `all` or a comma-separated list of module names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(Selector::All);
        }
        let mut set = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(ParseSelectorError(s.to_string()));
            }
            set.insert(ModuleName::from(part));
        }
        Ok(Selector::Modules(set))
    }
}

/// Keeps the records whose module is selected, in their original order.
///
/// With [`Selector::All`] the input is returned unchanged. Otherwise a record
/// is kept iff the module implied by its file's basename is in the set.
pub fn filter(selector: &Selector, diagnostics: Vec<DiagnosticRecord>) -> Vec<DiagnosticRecord> {
    match selector {
        Selector::All => diagnostics,
        Selector::Modules(_) => diagnostics
            .into_iter()
            .filter(|rec| rec.module().is_some_and(|m| selector.contains(&m)))
            .collect(),
    }
}

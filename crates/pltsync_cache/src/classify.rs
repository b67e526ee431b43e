//! Classification of loaded modules into project-owned object files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pltsync_common::{LoadedModule, Origin, BEAM_EXT};
use tracing::debug;

/// How the standard-library root is compared against module paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Compare by path components instead of as a plain string prefix.
    ///
    /// With the default string prefix, a root of `/opt/lib` also excludes
    /// `/opt/library-x/m.beam`. Strict comparison only excludes paths
    /// inside the root directory itself.
    pub strict_prefix: bool,
}

/// Returns the object files of loaded modules that are file-backed, have
/// the compiled-artifact extension, and do not live under `otp_root`.
///
/// Preloaded modules and origins without a path are skipped.
pub fn classify(
    otp_root: &Path,
    loaded: &[LoadedModule],
    options: ClassifyOptions,
) -> BTreeSet<PathBuf> {
    let root = otp_root.to_string_lossy();
    let mut files = BTreeSet::new();

    for module in loaded {
        let path = match &module.origin {
            Origin::Path(p) => p,
            Origin::Preloaded => continue,
            other => {
                debug!(module = %module.name, origin = %other, "skipping module without object file");
                continue;
            }
        };

        let candidate = Path::new(path);
        if candidate.extension().and_then(|e| e.to_str()) != Some(BEAM_EXT) {
            continue;
        }

        let in_otp = if options.strict_prefix {
            candidate.starts_with(otp_root)
        } else {
            path.starts_with(&*root)
        };
        if !in_otp {
            files.insert(candidate.to_path_buf());
        }
    }

    debug!(loaded = loaded.len(), project = files.len(), "classified modules");
    files
}

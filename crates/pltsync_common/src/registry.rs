//! Module registry snapshots.
//!
//! A [`ModuleRegistry`] answers two questions: which modules are currently
//! loaded, and where a given module was loaded from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::module::{LoadedModule, ModuleName, Origin, BEAM_EXT};

/// Source of loaded-module information.
pub trait ModuleRegistry {
    /// Returns a snapshot of every currently loaded module.
    fn loaded(&self) -> Vec<LoadedModule>;

    /// Resolves a single module's origin, or `None` if it is not loaded.
    fn origin(&self, name: &ModuleName) -> Option<Origin>;
}

/// An in-memory registry over a fixed module list.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    modules: Vec<LoadedModule>,
}

impl StaticRegistry {
    /// Creates a registry reporting exactly the given modules.
    pub fn new(modules: Vec<LoadedModule>) -> Self {
        Self { modules }
    }
}

impl ModuleRegistry for StaticRegistry {
    fn loaded(&self) -> Vec<LoadedModule> {
        self.modules.clone()
    }

    fn origin(&self, name: &ModuleName) -> Option<Origin> {
        self.modules
            .iter()
            .find(|m| &m.name == name)
            .map(|m| m.origin.clone())
    }
}

/// A registry built by scanning code-path directories for object files.
///
/// Directories are searched in order and the first one providing a module
/// wins, so earlier entries shadow later ones. Preloaded module names are
/// reported with [`Origin::Preloaded`] and shadow every directory.
#[derive(Debug, Clone)]
pub struct CodePathRegistry {
    modules: Vec<LoadedModule>,
    index: HashMap<ModuleName, usize>,
}

impl CodePathRegistry {
    /// Scans `code_paths` and records `preloaded` names.
    ///
    /// Relative directories are made absolute against the current directory,
    /// so every reported path is absolute. Missing or unreadable directories
    /// are skipped.
    pub fn scan(code_paths: &[PathBuf], preloaded: &[String]) -> Self {
        let mut registry = Self {
            modules: Vec::new(),
            index: HashMap::new(),
        };

        for name in preloaded {
            registry.insert(LoadedModule::preloaded(name.as_str()));
        }

        for dir in code_paths {
            // Origins are compared with the absolute paths the engine records.
            let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.clone());
            let mut beams = match list_beams(&dir) {
                Ok(b) => b,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping code path");
                    continue;
                }
            };
            beams.sort();
            for path in beams {
                let Some(name) = ModuleName::from_path(&path) else {
                    continue;
                };
                registry.insert(LoadedModule {
                    name,
                    origin: Origin::Path(path.to_string_lossy().into_owned()),
                });
            }
        }

        tracing::debug!(modules = registry.modules.len(), "scanned code paths");
        registry
    }

    fn insert(&mut self, module: LoadedModule) {
        if self.index.contains_key(&module.name) {
            return;
        }
        self.index.insert(module.name.clone(), self.modules.len());
        self.modules.push(module);
    }
}

impl ModuleRegistry for CodePathRegistry {
    fn loaded(&self) -> Vec<LoadedModule> {
        self.modules.clone()
    }

    fn origin(&self, name: &ModuleName) -> Option<Origin> {
        self.index
            .get(name)
            .map(|&i| self.modules[i].origin.clone())
    }
}

/// Lists the object files directly inside `dir`.
fn list_beams(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(BEAM_EXT) {
            out.push(path);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn static_registry_origin() {
        let reg = StaticRegistry::new(vec![
            LoadedModule::from_file("foo", "/ebin/foo.beam"),
            LoadedModule::preloaded("erlang"),
        ]);
        assert_eq!(reg.loaded().len(), 2);
        assert_eq!(
            reg.origin(&"foo".into()),
            Some(Origin::Path("/ebin/foo.beam".into()))
        );
        assert_eq!(reg.origin(&"erlang".into()), Some(Origin::Preloaded));
        assert_eq!(reg.origin(&"missing".into()), None);
    }

    #[test]
    fn scan_finds_beams_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.beam"), b"").unwrap();
        fs::write(dir.path().join("b.beam"), b"").unwrap();
        fs::write(dir.path().join("a.app"), b"").unwrap();
        fs::create_dir(dir.path().join("sub.beam")).unwrap();

        let reg = CodePathRegistry::scan(&[dir.path().to_path_buf()], &[]);
        let names: Vec<String> = reg.loaded().iter().map(|m| m.name.to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn earlier_code_path_shadows_later() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("m.beam"), b"").unwrap();
        fs::write(second.path().join("m.beam"), b"").unwrap();
        fs::write(second.path().join("n.beam"), b"").unwrap();

        let reg = CodePathRegistry::scan(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            &[],
        );
        assert_eq!(reg.loaded().len(), 2);
        let origin = reg.origin(&"m".into()).unwrap();
        assert!(origin
            .as_path()
            .unwrap()
            .starts_with(&*first.path().to_string_lossy()));
    }

    #[test]
    fn preloaded_shadow_code_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("erlang.beam"), b"").unwrap();
        let reg = CodePathRegistry::scan(&[dir.path().to_path_buf()], &["erlang".to_string()]);
        assert_eq!(reg.origin(&"erlang".into()), Some(Origin::Preloaded));
    }

    #[test]
    fn relative_code_path_yields_absolute_origins() {
        let dir = tempfile::tempdir_in(".").unwrap();
        assert!(dir.path().is_relative());
        fs::write(dir.path().join("app.beam"), b"").unwrap();

        let reg = CodePathRegistry::scan(&[dir.path().to_path_buf()], &[]);
        let origin = reg.origin(&"app".into()).unwrap();
        let path = Path::new(origin.as_path().unwrap());
        assert!(path.is_absolute());
        assert_eq!(path, std::path::absolute(dir.path().join("app.beam")).unwrap());
    }

    #[test]
    fn missing_dir_is_skipped() {
        let reg = CodePathRegistry::scan(&[PathBuf::from("/nonexistent/ebin")], &[]);
        assert!(reg.loaded().is_empty());
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::graph::ModuleOrigin;

/// Opaque token for a resolved module, independent of the spelling used
/// to import it. The filesystem locator uses the resolved file path;
/// test locators use whatever string they like.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleIdentity(String);

impl ModuleIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The module-resolution capability handed to the alias resolver.
///
/// `resolve` maps an import spelling to the module it denotes, or
/// `None` when the module cannot be located. `classify` reports where
/// the module comes from; the default is the honest `Unknown`.
pub trait ModuleLocator {
    fn resolve(&self, name: &str) -> Option<ModuleIdentity>;

    fn classify(&self, _name: &str) -> ModuleOrigin {
        ModuleOrigin::Unknown
    }
}

/// Explicitly-scoped registry of already-known modules.
///
/// Doubles as the pure locator implementation for tests: construct a
/// fresh one per test case instead of relying on ambient process state.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    entries: HashMap<String, ModuleIdentity>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, identity: ModuleIdentity) {
        self.entries.insert(name.into(), identity);
    }

    pub fn get(&self, name: &str) -> Option<&ModuleIdentity> {
        self.entries.get(name)
    }
}

impl ModuleLocator for ModuleRegistry {
    fn resolve(&self, name: &str) -> Option<ModuleIdentity> {
        self.entries.get(name).cloned()
    }
}

/// Locates modules by walking import search paths on disk, the way the
/// interpreter would: `os.path` resolves to `os/path.py` or
/// `os/path/__init__.py` under some search path. A preloaded registry
/// is consulted first.
#[derive(Debug, Clone, Default)]
pub struct FsModuleLocator {
    search_paths: Vec<PathBuf>,
    registry: ModuleRegistry,
}

impl FsModuleLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            registry: ModuleRegistry::new(),
        }
    }

    /// Current directory plus whatever PYTHONPATH carries.
    pub fn from_env() -> Self {
        let mut search_paths = vec![PathBuf::from(".")];
        if let Some(raw) = std::env::var_os("PYTHONPATH") {
            search_paths.extend(std::env::split_paths(&raw));
        }
        Self::new(search_paths)
    }

    pub fn with_registry(mut self, registry: ModuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = name.split('.').collect();
        self.search_paths
            .iter()
            .find_map(|base| Self::locate_in(base, &segments))
    }

    fn locate_in(base: &Path, segments: &[&str]) -> Option<PathBuf> {
        let (last, parents) = segments.split_last()?;
        let mut dir = base.to_path_buf();
        for segment in parents {
            dir.push(segment);
            if !dir.is_dir() {
                return None;
            }
        }
        let module_file = dir.join(format!("{last}.py"));
        if module_file.is_file() {
            return Some(module_file);
        }
        let package_init = dir.join(last).join("__init__.py");
        if package_init.is_file() {
            return Some(package_init);
        }
        None
    }
}

impl ModuleLocator for FsModuleLocator {
    fn resolve(&self, name: &str) -> Option<ModuleIdentity> {
        if let Some(identity) = self.registry.get(name) {
            return Some(identity.clone());
        }
        self.locate(name).map(|path| {
            let canonical = path.canonicalize().unwrap_or(path);
            ModuleIdentity::new(canonical.to_string_lossy())
        })
    }

    fn classify(&self, name: &str) -> ModuleOrigin {
        match self.locate(name) {
            Some(path)
                if path
                    .components()
                    .any(|c| c.as_os_str() == "site-packages") =>
            {
                ModuleOrigin::External
            }
            _ => ModuleOrigin::Unknown,
        }
    }
}

/// Maps import spellings to canonical names so that two spellings of
/// the same module land on one graph node.
///
/// The canonical name for a module is the first spelling ever seen for
/// it. A spelling the locator cannot resolve is its own identity. State
/// is scoped to one resolver; share the instance across files to get
/// cross-file deduplication.
#[derive(Debug)]
pub struct AliasResolver<L> {
    locator: L,
    canonical: HashMap<ModuleIdentity, String>,
}

impl<L: ModuleLocator> AliasResolver<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            canonical: HashMap::new(),
        }
    }

    pub fn lookup(&mut self, spelling: &str) -> String {
        match self.locator.resolve(spelling) {
            Some(identity) => self
                .canonical
                .entry(identity)
                .or_insert_with(|| spelling.to_string())
                .clone(),
            None => spelling.to_string(),
        }
    }

    pub fn classify(&self, spelling: &str) -> ModuleOrigin {
        self.locator.classify(spelling)
    }
}

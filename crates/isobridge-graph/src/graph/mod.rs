//! The immutable per-package module graph.

mod construction;
mod resolution;
mod serialization;

pub use construction::ModuleGraphModel;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{ModuleNode, ModulePath, PackageId};

/// All modules of one package with their export surfaces.
///
/// Built fresh by every parse; callers own caching. Invariants: every lazy
/// path and the main-module path (when present) are keys of `modules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "serialization::GraphDocument", try_from = "serialization::GraphDocument")]
pub struct PackageGraph {
    package_id: PackageId,
    source_path: String,
    install_root: String,
    specifier_root: String,
    main_module_path: Option<ModulePath>,
    modules: IndexMap<ModulePath, ModuleNode>,
    lazy_modules: IndexSet<ModulePath>,
}

impl PackageGraph {
    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    /// Diagnostic path of the bundle this graph was parsed from.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Host loader path of the package root, e.g. `/node_modules/meteor/ostrio:cookies`.
    pub fn install_root(&self) -> &str {
        &self.install_root
    }

    /// Import specifier of the package root, e.g. `meteor/ostrio:cookies`.
    pub fn specifier_root(&self) -> &str {
        &self.specifier_root
    }

    pub fn main_module_path(&self) -> Option<&ModulePath> {
        self.main_module_path.as_ref()
    }

    pub fn main_module(&self) -> Option<&ModuleNode> {
        self.main_module_path
            .as_ref()
            .and_then(|path| self.modules.get(path))
    }

    /// Look up a module by its exact normalized path.
    pub fn module(&self, path: &ModulePath) -> Option<&ModuleNode> {
        self.modules.get(path)
    }

    /// Modules in bundle order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleNode> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Every module path, in bundle order.
    pub fn known_paths(&self) -> Vec<String> {
        self.modules.keys().map(ToString::to_string).collect()
    }

    pub fn lazy_modules(&self) -> impl Iterator<Item = &ModulePath> {
        self.lazy_modules.iter()
    }

    pub fn is_lazy(&self, path: &ModulePath) -> bool {
        self.lazy_modules.contains(path)
    }
}

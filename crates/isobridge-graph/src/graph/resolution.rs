//! Path lookups that tolerate the spellings import requests actually use.

use std::path::Path;

use path_clean::PathClean;

use super::PackageGraph;
use crate::{ModuleNode, ModulePath};

impl PackageGraph {
    /// Resolve a package-relative request to a module.
    ///
    /// Accepts a leading `./` or `/`, a missing `.js` extension and directory
    /// requests that land on `index.js`. An empty request means the main module.
    pub fn resolve(&self, request: &str) -> Option<&ModuleNode> {
        let path = ModulePath::new(request);
        if path.is_empty() {
            return self.main_module();
        }
        self.module(&path)
            .or_else(|| self.module(&path.with_suffix(".js")))
            .or_else(|| self.module(&path.join("index.js")))
    }

    /// Resolve the target of a `link` call made from `from` to a module of
    /// this package.
    ///
    /// Returns `None` for targets in other packages or outside the package root.
    pub fn resolve_link(&self, from: &ModulePath, specifier: &str) -> Option<&ModuleNode> {
        if is_relative(specifier) {
            let joined = Path::new(from.parent()).join(specifier).clean();
            let joined = joined.to_string_lossy().replace('\\', "/");
            if joined == ".." || joined.starts_with("../") {
                return None;
            }
            return self.resolve(&joined);
        }

        let rest = specifier
            .strip_prefix(self.install_root())
            .or_else(|| specifier.strip_prefix(self.specifier_root()))?;
        if rest.is_empty() {
            return self.main_module();
        }
        self.resolve(rest.strip_prefix('/')?)
    }

    /// Path the host loader registers a module under.
    pub fn install_path(&self, path: &ModulePath) -> String {
        format!("{}/{path}", self.install_root())
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

//! Assembly of module nodes into a [`PackageGraph`].

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use super::PackageGraph;
use crate::analyzer::ExportAnalyzer;
use crate::parser::InstallerShape;
use crate::parser::shape::FlatPackage;
use crate::{ExportDescriptor, ModuleNode, ModulePath, PackageId, PackageManifest};

/// Collects modules for one package and freezes them into a graph.
///
/// ```
/// use isobridge_graph::{ExportDescriptor, ModuleGraphModel, PackageId, PackageManifest};
/// use isobridge_graph::parser::InstallerShape;
///
/// let mut model = ModuleGraphModel::new(
///     PackageId::parse("pkg").unwrap(),
///     "packages/pkg.js",
///     &InstallerShape::default(),
/// );
/// model.add_module("main.js".into(), vec![ExportDescriptor::named("add")]);
///
/// let graph = model.finish(&PackageManifest::default().with_main_module("main.js"));
/// assert_eq!(graph.main_module().unwrap().exports().len(), 1);
/// ```
#[derive(Debug)]
pub struct ModuleGraphModel {
    package_id: PackageId,
    source_path: String,
    install_root: String,
    specifier_root: String,
    modules: IndexMap<ModulePath, Vec<ExportDescriptor>>,
}

impl ModuleGraphModel {
    pub fn new(package_id: PackageId, source_path: impl Into<String>, shape: &InstallerShape) -> Self {
        Self {
            install_root: format!(
                "/{}/{}/{package_id}",
                shape.namespace_key, shape.scope_key
            ),
            specifier_root: format!("{}/{package_id}", shape.scope_key),
            package_id,
            source_path: source_path.into(),
            modules: IndexMap::new(),
        }
    }

    /// Add a module. A second module at the same normalized path replaces the first.
    pub fn add_module(&mut self, path: ModulePath, exports: Vec<ExportDescriptor>) {
        if let Some(previous) = self.modules.insert(path.clone(), exports) {
            debug!(
                module = %path,
                replaced_exports = previous.len(),
                "duplicate module path in bundle, keeping the later entry"
            );
        }
    }

    /// Run the export analyzer over every flattened factory.
    pub(crate) fn assemble(flat: FlatPackage<'_, '_>, source_path: &str, shape: &InstallerShape) -> Self {
        let mut model = Self::new(flat.package_id, source_path, shape);
        for entry in flat.factories {
            let exports = ExportAnalyzer::analyze(&entry.factory);
            debug!(module = %entry.path, exports = exports.len(), "analyzed module factory");
            model.add_module(entry.path, exports);
        }
        model
    }

    /// Tag the main module and attach the lazy set, dropping lazy paths the
    /// bundle does not contain.
    pub fn finish(self, manifest: &PackageManifest) -> PackageGraph {
        let main_module_path = manifest
            .main_module
            .as_deref()
            .map(ModulePath::new)
            .filter(|path| {
                let present = self.modules.contains_key(path);
                if !present {
                    warn!(
                        package = %self.package_id,
                        main_module = %path,
                        "main module is not part of the bundle; requests must name a module explicitly"
                    );
                }
                present
            });

        let lazy_modules: IndexSet<ModulePath> = manifest
            .lazy_modules
            .iter()
            .map(|raw| ModulePath::new(raw))
            .filter(|path| {
                let present = self.modules.contains_key(path);
                if !present {
                    debug!(package = %self.package_id, lazy = %path, "dropping unknown lazy module");
                }
                present
            })
            .collect();

        let modules = self
            .modules
            .into_iter()
            .map(|(path, exports)| {
                let node = ModuleNode::builder(path.clone())
                    .exports(exports)
                    .main_module(main_module_path.as_ref() == Some(&path))
                    .build();
                (path, node)
            })
            .collect();

        PackageGraph {
            package_id: self.package_id,
            source_path: self.source_path,
            install_root: self.install_root,
            specifier_root: self.specifier_root,
            main_module_path,
            modules,
            lazy_modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModuleGraphModel {
        let mut model = ModuleGraphModel::new(
            PackageId::parse("ostrio:cookies").unwrap(),
            "packages/ostrio_cookies.js",
            &InstallerShape::default(),
        );
        model.add_module("cookies.js".into(), vec![ExportDescriptor::named("Cookies")]);
        model.add_module("lazy/extra.js".into(), vec![]);
        model
    }

    #[test]
    fn tags_main_module_and_roots() {
        let graph = model().finish(&PackageManifest::default().with_main_module("./cookies.js"));
        assert_eq!(graph.main_module_path().map(ModulePath::as_str), Some("cookies.js"));
        assert!(graph.main_module().unwrap().is_main_module());
        assert!(!graph.module(&"lazy/extra.js".into()).unwrap().is_main_module());
        assert_eq!(graph.install_root(), "/node_modules/meteor/ostrio:cookies");
        assert_eq!(graph.specifier_root(), "meteor/ostrio:cookies");
    }

    #[test]
    fn unknown_lazy_paths_are_dropped() {
        let manifest = PackageManifest::default()
            .with_lazy_module("lazy/extra.js")
            .with_lazy_module("lazy/missing.js");
        let graph = model().finish(&manifest);
        let lazy: Vec<_> = graph.lazy_modules().map(ModulePath::as_str).collect();
        assert_eq!(lazy, vec!["lazy/extra.js"]);
        assert!(graph.is_lazy(&"lazy/extra.js".into()));
    }

    #[test]
    fn missing_main_module_leaves_path_empty() {
        let graph = model().finish(&PackageManifest::default().with_main_module("index.js"));
        assert!(graph.main_module_path().is_none());
        assert!(graph.modules().all(|node| !node.is_main_module()));
    }

    #[test]
    fn later_module_with_same_path_wins() {
        let mut model = model();
        model.add_module(ModulePath::from_segments(["cookies.js"]), vec![]);
        let graph = model.finish(&PackageManifest::default());
        assert_eq!(graph.len(), 2);
        assert!(graph.module(&"cookies.js".into()).unwrap().is_side_effect_only());
    }
}

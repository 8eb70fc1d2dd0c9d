//! Serialization methods for PackageGraph.

use serde::{Deserialize, Serialize};

use super::PackageGraph;
use crate::error::GraphDocumentError;
use crate::{ModuleNode, ModulePath, PackageId};

/// Wire form of a graph: modules as an ordered list rather than a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphDocument {
    package_id: PackageId,
    #[serde(default)]
    source_path: String,
    install_root: String,
    specifier_root: String,
    main_module_path: Option<ModulePath>,
    #[serde(default)]
    lazy_modules: Vec<ModulePath>,
    modules: Vec<ModuleNode>,
}

impl From<PackageGraph> for GraphDocument {
    fn from(graph: PackageGraph) -> Self {
        Self {
            package_id: graph.package_id,
            source_path: graph.source_path,
            install_root: graph.install_root,
            specifier_root: graph.specifier_root,
            main_module_path: graph.main_module_path,
            lazy_modules: graph.lazy_modules.into_iter().collect(),
            modules: graph.modules.into_values().collect(),
        }
    }
}

impl TryFrom<GraphDocument> for PackageGraph {
    type Error = GraphDocumentError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        let modules: indexmap::IndexMap<_, _> = doc
            .modules
            .into_iter()
            .map(|node| {
                let is_main = doc.main_module_path.as_ref() == Some(node.path());
                (node.path().clone(), node.with_main_flag(is_main))
            })
            .collect();

        if let Some(main) = &doc.main_module_path {
            if !modules.contains_key(main) {
                return Err(GraphDocumentError::UnknownMainModule(main.to_string()));
            }
        }
        if let Some(lazy) = doc.lazy_modules.iter().find(|path| !modules.contains_key(*path)) {
            return Err(GraphDocumentError::UnknownLazyModule(lazy.to_string()));
        }

        Ok(Self {
            package_id: doc.package_id,
            source_path: doc.source_path,
            install_root: doc.install_root,
            specifier_root: doc.specifier_root,
            main_module_path: doc.main_module_path,
            lazy_modules: doc.lazy_modules.into_iter().collect(),
            modules,
        })
    }
}

impl PackageGraph {
    /// Export the graph to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load a graph previously written by [`PackageGraph::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

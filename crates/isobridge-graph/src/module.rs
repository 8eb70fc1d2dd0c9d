use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ExportDescriptor, ModulePath};

/// One file of a package together with its export surface.
///
/// Nodes are immutable once built; the export list is wrapped in `Arc` so
/// cloning a node (or the graph holding it) stays cheap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    path: ModulePath,
    #[serde(with = "arc_vec_serde")]
    exports: Arc<Vec<ExportDescriptor>>,
    #[serde(rename = "isMain", default)]
    is_main_module: bool,
}

// Serde helper for Arc<Vec<T>>
mod arc_vec_serde {
    use super::*;
    use serde::de::Deserializer;
    use serde::ser::Serializer;

    pub fn serialize<S, T>(value: &Arc<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.as_ref().serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Arc<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Vec::deserialize(deserializer).map(Arc::new)
    }
}

impl ModuleNode {
    /// Create a new module builder with no exports.
    pub fn builder(path: ModulePath) -> ModuleNodeBuilder {
        ModuleNodeBuilder {
            node: Self {
                path,
                exports: Arc::new(Vec::new()),
                is_main_module: false,
            },
        }
    }

    pub fn path(&self) -> &ModulePath {
        &self.path
    }

    /// Export descriptors in declaration order.
    pub fn exports(&self) -> &[ExportDescriptor] {
        &self.exports
    }

    pub fn is_main_module(&self) -> bool {
        self.is_main_module
    }

    /// A module with no exports is loaded only for its side effects.
    pub fn is_side_effect_only(&self) -> bool {
        self.exports.is_empty()
    }

    /// Names contributed directly by this module, excluding `*` wildcards.
    pub fn exported_names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().filter_map(ExportDescriptor::exported_name)
    }

    /// Copy of this node with the main-module flag set.
    pub(crate) fn with_main_flag(&self, is_main_module: bool) -> Self {
        Self {
            is_main_module,
            ..self.clone()
        }
    }
}

/// Builder for [`ModuleNode`].
#[derive(Debug)]
pub struct ModuleNodeBuilder {
    node: ModuleNode,
}

impl ModuleNodeBuilder {
    pub fn exports(mut self, exports: Vec<ExportDescriptor>) -> Self {
        self.node.exports = Arc::new(exports);
        self
    }

    pub fn main_module(mut self, is_main_module: bool) -> Self {
        self.node.is_main_module = is_main_module;
        self
    }

    pub fn build(self) -> ModuleNode {
        self.node
    }
}

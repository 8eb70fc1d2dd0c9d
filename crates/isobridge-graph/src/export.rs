use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One entry of a module's export surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportDescriptor {
    /// `module.export({ name: () => value })`
    Named { name: String },

    /// `module.link("./other", { importedName: "localAlias" })`
    #[serde(rename_all = "camelCase")]
    ReExport {
        imported_name: String,
        local_alias: String,
        from_specifier: String,
    },

    /// `module.link("./other", { "*": alias })`
    ///
    /// An alias of `*` forwards every export of the target; any other alias
    /// binds the whole target namespace under that one name.
    #[serde(rename_all = "camelCase")]
    WildcardReExport {
        alias: String,
        from_specifier: String,
    },

    /// `module.exportDefault(expr)`
    Default,
}

impl ExportDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    pub fn re_export(
        imported_name: impl Into<String>,
        local_alias: impl Into<String>,
        from_specifier: impl Into<String>,
    ) -> Self {
        Self::ReExport {
            imported_name: imported_name.into(),
            local_alias: local_alias.into(),
            from_specifier: from_specifier.into(),
        }
    }

    pub fn wildcard(alias: impl Into<String>, from_specifier: impl Into<String>) -> Self {
        Self::WildcardReExport {
            alias: alias.into(),
            from_specifier: from_specifier.into(),
        }
    }

    /// The single name this descriptor adds to the module namespace.
    ///
    /// `None` for a `*` wildcard, which contributes the target's names instead.
    pub fn exported_name(&self) -> Option<&str> {
        match self {
            Self::Named { name } => Some(name),
            Self::ReExport { local_alias, .. } => Some(local_alias),
            Self::WildcardReExport { alias, .. } if alias == "*" => None,
            Self::WildcardReExport { alias, .. } => Some(alias),
            Self::Default => Some("default"),
        }
    }

    /// Key under which later declarations replace earlier ones.
    pub fn binding_key(&self) -> Cow<'_, str> {
        match (self.exported_name(), self) {
            (Some(name), _) => Cow::Borrowed(name),
            (None, Self::WildcardReExport { from_specifier, .. }) => {
                Cow::Owned(format!("*{from_specifier}"))
            }
            (None, _) => Cow::Borrowed("*"),
        }
    }

    /// Returns true for a `*` wildcard that forwards every name of its target.
    pub fn is_star(&self) -> bool {
        matches!(self, Self::WildcardReExport { alias, .. } if alias == "*")
    }

    /// Convenience check for default exports.
    pub fn is_default(&self) -> bool {
        self.exported_name() == Some("default")
    }

    /// Specifier of the module this descriptor re-exports from.
    pub fn from_specifier(&self) -> Option<&str> {
        match self {
            Self::ReExport { from_specifier, .. } | Self::WildcardReExport { from_specifier, .. } => {
                Some(from_specifier)
            }
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Package metadata supplied alongside a bundle.
///
/// The main module and the lazy set come from the host's package manifest;
/// the parser never infers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageManifest {
    /// Package to extract when a bundle registers more than one.
    pub package: Option<String>,
    /// Entry module of the package, relative to the package root.
    pub main_module: Option<String>,
    /// Modules only reachable through an explicit deep import.
    #[serde(alias = "lazy")]
    pub lazy_modules: Vec<String>,
}

impl PackageManifest {
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_main_module(mut self, path: impl Into<String>) -> Self {
        self.main_module = Some(path.into());
        self
    }

    pub fn with_lazy_module(mut self, path: impl Into<String>) -> Self {
        self.lazy_modules.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_json() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{ "mainModule": "client.js", "lazyModules": ["lazy/a.js"] }"#,
        )
        .unwrap();
        assert_eq!(manifest.main_module.as_deref(), Some("client.js"));
        assert_eq!(manifest.lazy_modules, vec!["lazy/a.js".to_string()]);
        assert_eq!(manifest.package, None);
    }

    #[test]
    fn builder_helpers() {
        let manifest = PackageManifest::default()
            .with_package("ostrio:cookies")
            .with_main_module("main.js")
            .with_lazy_module("a.js");
        assert_eq!(manifest.package.as_deref(), Some("ostrio:cookies"));
        assert_eq!(manifest.lazy_modules.len(), 1);
    }
}

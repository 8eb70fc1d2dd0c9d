//! Error types for stub synthesis

use isobridge_graph::StructuredError;
use miette::Diagnostic;
use serde_json::{Value, json};
use thiserror::Error;

/// A stub was requested for a module the package graph does not contain.
///
/// Fatal for that one request; the graph itself stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error(
    "unknown module '{requested}' in package '{package_id}' (known modules: {})",
    format_known(.known_paths)
)]
#[diagnostic(
    code(isobridge::stub::unknown_module_path),
    help("request one of the known module paths, or name the package main module in the manifest")
)]
pub struct UnknownModulePathError {
    pub package_id: String,
    pub requested: String,
    /// Every module path of the package, in bundle order.
    pub known_paths: Vec<String>,
}

impl UnknownModulePathError {
    pub fn new(
        package_id: impl Into<String>,
        requested: impl Into<String>,
        known_paths: Vec<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            requested: requested.into(),
            known_paths,
        }
    }
}

fn format_known(paths: &[String]) -> String {
    if paths.is_empty() {
        "none".to_string()
    } else {
        paths.join(", ")
    }
}

/// Result type for stub synthesis
pub type Result<T> = std::result::Result<T, UnknownModulePathError>;

impl StructuredError for UnknownModulePathError {
    fn kind(&self) -> &'static str {
        "UnknownModulePathError"
    }

    fn context(&self) -> Value {
        json!({
            "packageId": self.package_id,
            "requested": self.requested,
            "knownPaths": self.known_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_lists_known_modules() {
        let err = UnknownModulePathError::new("pkg", "pkg/missing.js", vec!["main.js".to_string()]);
        assert!(err.to_string().contains("main.js"));

        let report = err.report();
        assert_eq!(report.kind, "UnknownModulePathError");
        assert_eq!(report.context["knownPaths"][0], "main.js");
        assert_eq!(report.context["packageId"], "pkg");
        assert_eq!(report.context["requested"], "pkg/missing.js");
    }

    #[test]
    fn empty_package_says_none() {
        let err = UnknownModulePathError::new("pkg", "a.js", Vec::new());
        assert!(err.to_string().ends_with("(known modules: none)"));
    }
}

//! Bundle parsing: locate the installer call and flatten its module tree.
//!
//! A compiled package bundle registers its files through one call of the
//! form
//!
//! ```text
//! meteorInstall({ node_modules: { meteor: { "ostrio:cookies": {
//!   "cookies.js": function (require, exports, module) { ... },
//!   "lib": { "util.js": function (require, exports, module) { ... } },
//! } } } })
//! ```
//!
//! [`GraphParser`] finds that call with an oxc visitor, checks each nesting
//! level of the argument against [`InstallerShape`], and hands every factory
//! to the export analyzer.

mod locate;
pub(crate) mod shape;

use std::time::Instant;

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MalformedBundleError, NestingLevel};
use crate::{PackageGraph, PackageManifest};
use locate::InstallerLocator;

/// Names that make up the installer call's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerShape {
    /// Callee of the installer call; also matched as the property of a member callee.
    pub callee: String,
    /// Fixed first-level key.
    pub namespace_key: String,
    /// Second-level key holding the packages; also the import specifier prefix.
    pub scope_key: String,
}

impl Default for InstallerShape {
    fn default() -> Self {
        Self {
            callee: "meteorInstall".to_string(),
            namespace_key: "node_modules".to_string(),
            scope_key: "meteor".to_string(),
        }
    }
}

/// Parses package bundles into [`PackageGraph`]s.
///
/// Stateless apart from its shape, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct GraphParser {
    shape: InstallerShape,
}

impl GraphParser {
    pub fn new(shape: InstallerShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> &InstallerShape {
        &self.shape
    }

    /// Parse one bundle.
    ///
    /// `source_path` is only used in diagnostics. The main module and lazy set
    /// come from `manifest`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedBundleError`] when the text is not valid JavaScript
    /// or the installer call does not have the expected shape. No partial
    /// graph is produced.
    pub fn parse(
        &self,
        source: &str,
        source_path: &str,
        manifest: &PackageManifest,
    ) -> Result<PackageGraph, MalformedBundleError> {
        let started = Instant::now();
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();

        if let Some(error) = ret.errors.first() {
            return Err(MalformedBundleError::new(
                source_path,
                NestingLevel::Syntax,
                "syntactically valid JavaScript",
                error.to_string(),
            ));
        }
        if ret.panicked {
            return Err(MalformedBundleError::new(
                source_path,
                NestingLevel::Syntax,
                "syntactically valid JavaScript",
                "input the parser could not recover from",
            ));
        }

        let mut locator =
            InstallerLocator::new(&self.shape, source_path, manifest.package.as_deref());
        locator.visit_program(&ret.program);
        let graph = locator.finish()?.finish(manifest);

        debug!(
            bundle = source_path,
            package = %graph.package_id(),
            modules = graph.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parsed package bundle"
        );
        Ok(graph)
    }
}

/// Parse a bundle with the default installer shape.
///
/// ```
/// use isobridge_graph::{ExportDescriptor, PackageManifest, parse_bundle};
///
/// let source = r#"
///     var require = meteorInstall({ node_modules: { meteor: { pkg: {
///         "main.js": function (require, exports, module) {
///             module.export({ add: () => add });
///         }
///     } } } });
/// "#;
/// let graph = parse_bundle(source, "packages/pkg.js", &PackageManifest::default()).unwrap();
/// let main = graph.resolve("main.js").unwrap();
/// assert_eq!(main.exports(), &[ExportDescriptor::named("add")]);
/// ```
pub fn parse_bundle(
    source: &str,
    source_path: &str,
    manifest: &PackageManifest,
) -> Result<PackageGraph, MalformedBundleError> {
    GraphParser::default().parse(source, source_path, manifest)
}

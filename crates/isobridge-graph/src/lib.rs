//! # isobridge-graph
//!
//! Static module graphs for compiled Meteor package bundles.
//!
//! A package bundle packs every file of a package into one installer call.
//! This crate reads that call without evaluating anything and recovers, per
//! file, the exports the file declares through its `module` parameter.
//!
//! ## Overview
//!
//! - **Pure**: no I/O, no global state. Every parse builds a fresh graph.
//! - **All-or-nothing**: a bundle either yields a complete [`PackageGraph`] or
//!   a [`MalformedBundleError`] naming the nesting level that failed.
//! - **Normalized paths**: `"lib": { "a.js": fn }` and `"lib/a.js": fn` give
//!   the same [`ModulePath`].
//!
//! ## Architecture
//!
//! ```text
//! bundle text
//!     │
//!     ▼
//! ┌──────────────┐  factories  ┌────────────────┐
//! │ GraphParser  │ ──────────▶ │ ExportAnalyzer │
//! └──────────────┘             └───────┬────────┘
//!                                      │ ExportDescriptor*
//!                                      ▼
//!                             ┌──────────────────┐
//!                             │ ModuleGraphModel │ ── manifest ──▶ PackageGraph
//!                             └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use isobridge_graph::{ExportDescriptor, GraphParser, PackageManifest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = r#"
//!     Package["core-runtime"].queue("pkg", function () {
//!         var require = meteorInstall({ node_modules: { meteor: { pkg: {
//!             "main.js": function (require, exports, module) {
//!                 module.export({ add: () => add, sub: () => sub });
//!                 function add(a, b) { return a + b; }
//!                 function sub(a, b) { return a - b; }
//!             }
//!         } } } });
//!         return { require: require, eagerModulePaths: ["/node_modules/meteor/pkg/main.js"] };
//!     });
//! "#;
//!
//! let manifest = PackageManifest::default().with_main_module("main.js");
//! let graph = GraphParser::default().parse(source, "packages/pkg.js", &manifest)?;
//!
//! assert_eq!(graph.package_id().to_string(), "pkg");
//! let main = graph.main_module().expect("main module");
//! assert_eq!(
//!     main.exports(),
//!     &[ExportDescriptor::named("add"), ExportDescriptor::named("sub")]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! [`GraphParser`] holds only its [`InstallerShape`] and can be shared across
//! threads. [`PackageGraph`] is immutable and cheap to clone.

pub mod analyzer;
pub mod error;
pub mod export;
pub mod graph;
pub mod manifest;
pub mod module;
pub mod module_path;
pub mod package_id;
pub mod parser;
pub mod specifier;

pub use analyzer::ExportAnalyzer;
pub use error::{
    ErrorReport, GraphDocumentError, MalformedBundleError, NestingLevel, SpecifierError,
    StructuredError,
};
pub use export::ExportDescriptor;
pub use graph::{ModuleGraphModel, PackageGraph};
pub use manifest::PackageManifest;
pub use module::{ModuleNode, ModuleNodeBuilder};
pub use module_path::ModulePath;
pub use package_id::PackageId;
pub use parser::{GraphParser, InstallerShape, parse_bundle};
pub use specifier::ImportSpecifier;

// Re-export the oxc types that appear in public signatures so downstream
// crates stay on the same oxc version.
pub mod oxc {
    //! oxc types used by isobridge's public API.

    /// Arena allocator for AST nodes
    pub use oxc_allocator::Allocator;

    /// Span types for source location tracking
    pub use oxc_span::{GetSpan, SourceType, Span};

    /// AST node types
    pub use oxc_ast::ast;

    /// AST visitor trait
    pub use oxc_ast_visit::Visit;

    /// Scope flags passed to function visitors
    pub use oxc_syntax::scope::ScopeFlags;

    /// JavaScript parser
    pub use oxc_parser::{Parser, ParserReturn};
}

#[cfg(test)]
mod tests;

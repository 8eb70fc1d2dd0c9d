//! Error types for bundle parsing and graph construction.
//!
//! Every error carries enough structure to be rendered either as a miette
//! diagnostic (CLI) or as a `{ kind, message, context }` report for tooling
//! that consumes isobridge output programmatically.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Position in the installer-call shape where a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "camelCase")]
pub enum NestingLevel {
    /// The bundle text is not valid JavaScript.
    Syntax,
    /// No call to the installer identifier was found.
    InstallerCall,
    /// The installer call's first argument.
    InstallerArgument,
    /// The fixed namespace key (`node_modules`).
    Namespace,
    /// The host scope key (`meteor`).
    HostScope,
    /// A package entry directly under the host scope.
    Package,
    /// A file or directory entry inside a package.
    ModuleTree {
        /// Number of directory levels below the package root.
        depth: usize,
        /// Path of the enclosing directory, relative to the package root.
        parent: String,
    },
}

impl fmt::Display for NestingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => f.write_str("bundle syntax"),
            Self::InstallerCall => f.write_str("installer call"),
            Self::InstallerArgument => f.write_str("installer argument"),
            Self::Namespace => f.write_str("namespace key"),
            Self::HostScope => f.write_str("host scope key"),
            Self::Package => f.write_str("package entry"),
            Self::ModuleTree { depth, parent } if parent.is_empty() => {
                write!(f, "module tree (depth {depth}, package root)")
            }
            Self::ModuleTree { depth, parent } => {
                write!(f, "module tree (depth {depth}, under '{parent}')")
            }
        }
    }
}

/// The bundle does not have the installer-call shape isobridge understands.
///
/// Parsing is all-or-nothing: when this error is returned no partial graph
/// exists.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("malformed bundle '{source_path}': at {level}, expected {expected} but found {found}")]
#[diagnostic(
    code(isobridge::graph::malformed_bundle),
    help("isobridge only reads compiled package bundles that register their files through a single installer call")
)]
pub struct MalformedBundleError {
    /// Diagnostic path of the bundle that failed to parse.
    pub source_path: String,
    /// Where in the nesting the check failed.
    pub level: NestingLevel,
    /// What the check expected to see.
    pub expected: String,
    /// What was actually there.
    pub found: String,
    /// Location of the offending node, if one exists.
    #[label("shape check failed here")]
    pub span: Option<SourceSpan>,
}

impl MalformedBundleError {
    /// Create an error with no source location.
    pub fn new(
        source_path: impl Into<String>,
        level: NestingLevel,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            level,
            expected: expected.into(),
            found: found.into(),
            span: None,
        }
    }

    /// Attach the byte range of the offending node.
    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        let start = start as usize;
        let len = (end as usize).saturating_sub(start);
        self.span = Some((start, len).into());
        self
    }
}

/// An import specifier that does not name a host package.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SpecifierError {
    #[error("import specifier '{specifier}' does not start with '{prefix}'")]
    #[diagnostic(code(isobridge::graph::specifier_prefix))]
    MissingPrefix { specifier: String, prefix: String },

    #[error("invalid package id '{0}': expected 'name' or 'scope:name'")]
    #[diagnostic(code(isobridge::graph::invalid_package_id))]
    InvalidPackageId(String),
}

/// A serialized graph document that violates the graph invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphDocumentError {
    #[error("main module '{0}' is not one of the graph's modules")]
    UnknownMainModule(String),

    #[error("lazy module '{0}' is not one of the graph's modules")]
    UnknownLazyModule(String),
}

/// Machine-readable rendering of an error: `{ kind, message, context }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    pub context: Value,
}

/// Errors that can be rendered as an [`ErrorReport`].
pub trait StructuredError: std::error::Error {
    /// Stable error kind name.
    fn kind(&self) -> &'static str;

    /// Offending paths, levels and other details.
    fn context(&self) -> Value;

    /// Build the full report.
    fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind().to_string(),
            message: self.to_string(),
            context: self.context(),
        }
    }
}

impl StructuredError for MalformedBundleError {
    fn kind(&self) -> &'static str {
        "MalformedBundleError"
    }

    fn context(&self) -> Value {
        json!({
            "sourcePath": self.source_path,
            "nesting": self.level,
            "expected": self.expected,
            "found": self.found,
            "offset": self.span.map(|span| span.offset()),
        })
    }
}

impl StructuredError for SpecifierError {
    fn kind(&self) -> &'static str {
        "SpecifierError"
    }

    fn context(&self) -> Value {
        match self {
            Self::MissingPrefix { specifier, prefix } => {
                json!({ "specifier": specifier, "prefix": prefix })
            }
            Self::InvalidPackageId(id) => json!({ "packageId": id }),
        }
    }
}

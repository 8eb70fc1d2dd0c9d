//! Error handling for the isobridge CLI.
//!
//! Library errors are wrapped into [`CliError`], which carries the context a
//! user needs to fix the problem. [`cli_error_to_miette`] turns it into a
//! diagnostic at the top of `main`.
//!
//! # Example
//!
//! ```rust,no_run
//! use isobridge_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_bundle(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass a compiled package bundle from .meteor/local/build")
//! }
//! ```

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;

use isobridge_config::ConfigError;
use isobridge_graph::MalformedBundleError;
use isobridge_stub::UnknownModulePathError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A bundle did not have the expected installer shape
    #[error("{error}")]
    MalformedBundle {
        error: Box<MalformedBundleError>,
        /// Bundle text, shown around the failing node
        bundle_source: String,
    },

    /// The requested module is not part of the package
    #[error("{0}")]
    UnknownModule(#[from] UnknownModulePathError),

    /// A manifest file is not valid JSON of the expected shape
    #[error(
        "Invalid manifest {}: {source}\n\nHint: A manifest looks like {{ \"mainModule\": \"main.js\", \"lazyModules\": [] }}",
        .path.display()
    )]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Some bundles of a multi-bundle `graph` run failed
    #[error("{failed} of {total} bundles failed to parse\n\nHint: Failing entries carry an error report in the output")]
    GraphFailures { failed: usize, total: usize },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Wrap a parse failure together with the bundle text it refers to.
    pub fn malformed_bundle(error: MalformedBundleError, bundle_source: impl Into<String>) -> Self {
        Self::MalformedBundle {
            error: Box::new(error),
            bundle_source: bundle_source.into(),
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a `Hint:` line to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isobridge_graph::NestingLevel;

    #[test]
    fn test_manifest_error_has_hint() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::InvalidManifest {
            path: PathBuf::from("manifest.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("manifest.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_malformed_bundle_keeps_library_message() {
        let inner = MalformedBundleError::new("pkg.js", NestingLevel::InstallerCall, "a call", "nothing");
        let expected = inner.to_string();
        let err = CliError::malformed_bundle(inner, "var x;");
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_cli_error_from_unknown_module() {
        let err: CliError = UnknownModulePathError::new("pkg", "a.js", vec!["main.js".into()]).into();
        assert!(matches!(err, CliError::UnknownModule(_)));
        assert!(err.to_string().contains("main.js"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/bundle.js").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), CliError> =
            Err(CliError::InvalidArgument("bad".to_string()));

        let err = result.with_hint("Try something else").unwrap_err();
        assert!(err.to_string().contains("Hint: Try something else"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), CliError> = Err(CliError::Custom("inner".to_string()));

        let err = result.context("Failed to write stub").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write stub: inner");
    }
}

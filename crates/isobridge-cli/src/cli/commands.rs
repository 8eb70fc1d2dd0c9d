use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available isobridge subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract package graphs from bundles
    ///
    /// Parses every bundle in parallel and prints the graphs as JSON. With a
    /// single bundle the graph itself is printed; with several, an array of
    /// `{ bundle, graph }` or `{ bundle, error }` entries.
    Graph(GraphArgs),

    /// Generate the ES module stub for a package module
    ///
    /// Examples:
    ///   isobridge stub packages/ostrio_cookies.js
    ///   isobridge stub packages/ostrio_cookies.js meteor/ostrio:cookies/lib/util.js
    Stub(StubArgs),

    /// Print the resolved configuration
    ///
    /// Shows defaults merged with the config file and ISOBRIDGE_* environment
    /// variables, as TOML.
    Config(ConfigArgs),
}

/// Package metadata flags shared by `graph` and `stub`
#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// JSON manifest with `package`, `mainModule` and `lazyModules`
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Main module of the package, relative to the package root
    #[arg(long, value_name = "PATH")]
    pub main_module: Option<String>,

    /// Module only reachable through deep imports (repeatable)
    #[arg(long = "lazy", value_name = "PATH")]
    pub lazy: Vec<String>,

    /// Package to extract when a bundle registers several
    #[arg(long, value_name = "ID")]
    pub package: Option<String>,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Bundle files to parse
    #[arg(required = true, value_name = "BUNDLE")]
    pub bundles: Vec<PathBuf>,

    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Arguments for the stub command
#[derive(Args, Debug)]
pub struct StubArgs {
    /// Bundle file containing the package
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Module to bridge; defaults to the package main module
    ///
    /// Accepts `meteor/<package>/<path>`, `<package>/<path>` or a
    /// package-relative path.
    #[arg(value_name = "SPECIFIER")]
    pub specifier: Option<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Request id echoed into the stub and its validation messages
    #[arg(long, value_name = "ID")]
    pub request_id: Option<String>,

    /// Write the stub to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Store the stub and bundle under this directory for inspection
    ///
    /// Overrides `debug_dir` from the configuration.
    #[arg(long, value_name = "DIR")]
    pub debug_dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the JSON schema of the configuration instead
    #[arg(long)]
    pub schema: bool,
}

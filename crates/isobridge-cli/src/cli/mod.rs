//! Command-line interface definition for isobridge.
//!
//! # Command Structure
//!
//! - `isobridge graph` - extract package graphs from bundles as JSON
//! - `isobridge stub` - generate the ES module stub for one package module
//! - `isobridge config` - print the resolved configuration or its schema

mod commands;
mod tests;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{Command, ConfigArgs, GraphArgs, ManifestArgs, StubArgs};

/// isobridge - static ES module bridges for Meteor packages
#[derive(Parser, Debug)]
#[command(
    name = "isobridge",
    version,
    about = "Static ES module bridges for Meteor packages",
    long_about = "isobridge reads compiled Meteor package bundles, extracts each package's\n\
                  module graph and export surface, and generates ES module stubs that\n\
                  modern bundlers can import statically."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-module decisions, skipped entries and timings.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (isobridge.toml, isobridge.json or package.json)
    ///
    /// Without this flag the current directory is searched.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

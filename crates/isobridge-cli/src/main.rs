//! isobridge CLI - Meteor package graphs and ES module stubs.
//!
//! This is the main entry point. It handles command-line argument parsing,
//! logging initialization, configuration loading and command dispatch.

use clap::Parser;
use isobridge_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = commands::load_config(args.config.as_deref()).and_then(|config| match args.command {
        cli::Command::Graph(graph_args) => commands::graph_execute(graph_args, &config),
        cli::Command::Stub(stub_args) => commands::stub_execute(stub_args, &config),
        cli::Command::Config(config_args) => commands::config_execute(config_args, &config),
    });

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}

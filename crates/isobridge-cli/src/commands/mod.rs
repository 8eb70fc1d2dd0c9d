//! Command implementations for the isobridge CLI.
//!
//! - [`graph`] - extract package graphs as JSON
//! - [`stub`] - generate ES module stubs
//! - [`config`] - show the resolved configuration
//!
//! Each command provides an `execute` function taking its parsed arguments
//! and the loaded configuration.

pub mod config;
mod debug;
pub mod graph;
pub mod stub;
pub(crate) mod utils;

pub use config::execute as config_execute;
pub use graph::execute as graph_execute;
pub use stub::execute as stub_execute;
pub use utils::load_config;

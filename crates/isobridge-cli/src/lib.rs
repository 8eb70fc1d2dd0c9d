//! isobridge CLI - Meteor package graphs and ES module stubs.
//!
//! This crate provides the `isobridge` binary on top of `isobridge-graph`,
//! `isobridge-config` and `isobridge-stub`.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `graph`, `stub` and `config` implementations
//! - [`error`] - CLI error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use isobridge_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};

//! Logging infrastructure for the isobridge CLI.
//!
//! Libraries only emit `tracing` events; this module decides what is shown.
//!
//! # Example
//!
//! ```rust,no_run
//! use isobridge_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Parsing bundle");
//! debug!("Module: {}", "lib/util.js");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str =
    "isobridge_cli=debug,isobridge_graph=debug,isobridge_config=debug,isobridge_stub=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str =
    "isobridge_cli=info,isobridge_graph=info,isobridge_config=info,isobridge_stub=info";

/// Pick the filter for the given flags.
///
/// The logging level is determined in this order:
/// 1. `--verbose`: debug for isobridge crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for isobridge crates
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at the start of the program. Logs go to stderr so stdout only
/// carries command output.
///
/// # Examples
///
/// ```rust,no_run
/// use isobridge_cli::logger::init_logger;
///
/// // Debug logging without colors
/// init_logger(true, false, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(build_filter(verbose, quiet), no_color);
}

/// Initialize the logger with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false) // Don't show the module path
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

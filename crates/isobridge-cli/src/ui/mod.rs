//! Terminal status messages.
//!
//! Messages go to stderr so stdout stays clean for JSON and stub output.
//!
//! # Examples
//!
//! ```no_run
//! use isobridge_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Wrote stub to stubs/cookies.js");
//! ui::warning("Module is lazy; import it eagerly");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

mod messages;

pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to terminal
/// detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether messages are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors_enabled());
    }
}

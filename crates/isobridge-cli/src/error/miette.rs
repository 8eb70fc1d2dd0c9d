//! Miette diagnostic conversion for CLI errors.

use miette::{NamedSource, Report};

use crate::error::CliError;

/// Convert CliError to miette Report
///
/// Library errors keep their diagnostic codes; bundle errors also get the
/// bundle text so the failing node is labelled in context.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::MalformedBundle {
            error,
            bundle_source,
        } => {
            let name = error.source_path.clone();
            Report::new(*error).with_source_code(NamedSource::new(name, bundle_source))
        }
        CliError::UnknownModule(e) => Report::new(e),
        CliError::Config(e) => match e.hint() {
            Some(hint) => miette::miette!(
                code = "isobridge::config",
                help = hint.to_string(),
                "Configuration error: {}",
                e
            ),
            None => miette::miette!(code = "isobridge::config", "Configuration error: {}", e),
        },
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isobridge_graph::{MalformedBundleError, NestingLevel};

    #[test]
    fn malformed_bundle_keeps_code() {
        let inner = MalformedBundleError::new("pkg.js", NestingLevel::Namespace, "an object", "a string")
            .with_span(0, 3);
        let report = cli_error_to_miette(CliError::malformed_bundle(inner, "abc;"));
        let code = report.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("isobridge::graph::malformed_bundle"));
        assert!(report.source_code().is_some());
    }

    #[test]
    fn other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("x".to_string()));
        assert_eq!(report.to_string(), "Invalid argument: x");
    }
}

//! Schema checks that serde alone cannot express.

use isobridge_graph::PackageId;

use crate::config::BridgeConfig;
use crate::error::{ConfigError, Result};

/// Validate a loaded configuration.
///
/// # Example
///
/// ```
/// use isobridge_config::{BridgeConfig, validate};
///
/// let mut config = BridgeConfig::default();
/// validate(&config).unwrap();
///
/// config.installer.scope_key = "meteor/packages".to_string();
/// assert!(validate(&config).is_err());
/// ```
pub fn validate(config: &BridgeConfig) -> Result<()> {
    if !is_identifier(&config.installer.callee) {
        return Err(ConfigError::SchemaValidation {
            message: format!(
                "installer.callee '{}' is not a JavaScript identifier",
                config.installer.callee
            ),
            hint: Some("Use the bare function name, e.g. \"meteorInstall\"".to_string()),
        });
    }

    for (field, key) in [
        ("installer.namespace_key", &config.installer.namespace_key),
        ("installer.scope_key", &config.installer.scope_key),
    ] {
        if key.is_empty() || key.contains('/') {
            return Err(ConfigError::SchemaValidation {
                message: format!("{field} must be a single non-empty path segment, got '{key}'"),
                hint: None,
            });
        }
    }

    if config.runtime_installer.trim().is_empty() {
        return Err(ConfigError::SchemaValidation {
            message: "runtime_installer cannot be empty".to_string(),
            hint: Some("The default is \"Package.modules.meteorInstall\"".to_string()),
        });
    }

    for package in &config.stub_validation.ignore_packages {
        if PackageId::parse(package).is_err() {
            return Err(ConfigError::SchemaValidation {
                message: format!("stub_validation.ignore_packages has invalid package '{package}'"),
                hint: Some("Package names look like \"tracker\" or \"ostrio:cookies\"".to_string()),
            });
        }
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_member_expression_callee() {
        let mut config = BridgeConfig::default();
        config.installer.callee = "Package.modules.meteorInstall".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("installer.callee"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn rejects_invalid_ignored_package() {
        let mut config = BridgeConfig::default();
        config.stub_validation.ignore_packages = vec!["not a package".to_string()];
        assert!(validate(&config).is_err());
    }
}

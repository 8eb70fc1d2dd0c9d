//! Setting groups nested inside [`BridgeConfig`](crate::BridgeConfig).

use isobridge_graph::InstallerShape;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Runtime check that a stub's declared exports match what the host loader
/// actually produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StubValidationSettings {
    /// Turn validation off for every package.
    #[serde(default)]
    pub disabled: bool,

    /// Log mismatches with `console.warn` instead of throwing.
    #[serde(default = "default_warn_only", alias = "warnOnly")]
    pub warn_only: bool,

    /// Packages that never get a validation snippet (e.g. "ostrio:cookies").
    #[serde(default, alias = "ignorePackages")]
    pub ignore_packages: Vec<String>,
}

impl Default for StubValidationSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            warn_only: default_warn_only(),
            ignore_packages: Vec::new(),
        }
    }
}

impl StubValidationSettings {
    /// Whether stubs for `package` should carry a validation snippet.
    pub fn is_enabled_for(&self, package: &str) -> bool {
        !self.disabled && !self.ignore_packages.iter().any(|ignored| ignored == package)
    }
}

/// How the host build tool loads stubs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BridgeMode {
    /// Stubs rely on the client bundle already being loaded.
    #[default]
    Hmr,
    /// Stubs import the bundle prelude first.
    Ssr,
}

/// Names that make up the bundle's installer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// Installer function name, matched as a bare call or a member call.
    #[serde(default = "default_installer_callee")]
    pub callee: String,

    /// First-level key of the installer argument.
    #[serde(default = "default_namespace_key", alias = "namespaceKey")]
    pub namespace_key: String,

    /// Second-level key; also the import specifier prefix (`meteor/...`).
    #[serde(default = "default_scope_key", alias = "scopeKey")]
    pub scope_key: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            callee: default_installer_callee(),
            namespace_key: default_namespace_key(),
            scope_key: default_scope_key(),
        }
    }
}

impl From<InstallerConfig> for InstallerShape {
    fn from(config: InstallerConfig) -> Self {
        Self {
            callee: config.callee,
            namespace_key: config.namespace_key,
            scope_key: config.scope_key,
        }
    }
}

impl From<&InstallerConfig> for InstallerShape {
    fn from(config: &InstallerConfig) -> Self {
        config.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_respects_ignore_list() {
        let settings = StubValidationSettings {
            ignore_packages: vec!["ostrio:cookies".to_string()],
            ..Default::default()
        };
        assert!(settings.is_enabled_for("tracker"));
        assert!(!settings.is_enabled_for("ostrio:cookies"));
    }

    #[test]
    fn disabled_wins_over_everything() {
        let settings = StubValidationSettings {
            disabled: true,
            ..Default::default()
        };
        assert!(!settings.is_enabled_for("tracker"));
    }

    #[test]
    fn installer_config_matches_graph_defaults() {
        let shape: InstallerShape = InstallerConfig::default().into();
        assert_eq!(shape, InstallerShape::default());
    }
}

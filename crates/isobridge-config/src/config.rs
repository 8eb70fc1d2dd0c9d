//! Top-level configuration for isobridge.
//!
//! For file discovery and layered loading see the `discovery` module.

use std::path::PathBuf;

use isobridge_graph::InstallerShape;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::*;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::settings::{BridgeMode, InstallerConfig, StubValidationSettings};

/// isobridge configuration, loaded from `isobridge.toml`, `isobridge.json`
/// or the `isobridge` field of `package.json`.
///
/// Keys are snake_case; camelCase spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Stub flavor (hmr or ssr).
    #[serde(default)]
    pub mode: BridgeMode,

    /// Expression stubs call to register their synthetic module.
    #[serde(default = "default_runtime_installer", alias = "runtimeInstaller")]
    pub runtime_installer: String,

    /// Module imported first by stubs in ssr mode.
    #[serde(default = "default_bundle_prelude", alias = "bundlePrelude")]
    pub bundle_prelude: String,

    /// Directory for stub and bundle snapshots.
    #[serde(default, alias = "debugDir", skip_serializing_if = "Option::is_none")]
    pub debug_dir: Option<PathBuf>,

    /// Runtime export validation inside generated stubs.
    #[serde(default, alias = "stubValidation")]
    pub stub_validation: StubValidationSettings,

    /// Shape of the installer call in package bundles.
    #[serde(default)]
    pub installer: InstallerConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            stub_validation: StubValidationSettings::default(),
            mode: BridgeMode::default(),
            installer: InstallerConfig::default(),
            runtime_installer: default_runtime_installer(),
            bundle_prelude: default_bundle_prelude(),
            debug_dir: None,
        }
    }
}

impl BridgeConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use isobridge_config::{BridgeConfig, BridgeMode};
    /// use serde_json::json;
    ///
    /// let config = BridgeConfig::from_value(json!({
    ///     "mode": "ssr",
    ///     "stubValidation": { "warnOnly": false }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.mode, BridgeMode::Ssr);
    /// assert!(!config.stub_validation.warn_only);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Render as TOML, in the layout `isobridge.toml` expects.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// JSON Schema for the configuration file.
    pub fn json_schema() -> Value {
        schemars::schema_for!(BridgeConfig).to_value()
    }

    /// Installer shape for the graph parser.
    pub fn installer_shape(&self) -> InstallerShape {
        InstallerShape::from(&self.installer)
    }
}

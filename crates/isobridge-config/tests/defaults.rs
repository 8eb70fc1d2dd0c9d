//! Tests for default values and edge cases.

use isobridge_config::{BridgeConfig, BridgeMode, InstallerConfig, StubValidationSettings};
use serde_json::json;

#[test]
fn bridge_config_defaults() {
    let config = BridgeConfig::default();
    assert_eq!(config.mode, BridgeMode::Hmr);
    assert_eq!(config.runtime_installer, "Package.modules.meteorInstall");
    assert_eq!(config.bundle_prelude, "virtual:meteor-bundle");
    assert!(config.debug_dir.is_none());
}

#[test]
fn stub_validation_defaults() {
    let settings = StubValidationSettings::default();
    assert!(!settings.disabled);
    assert!(settings.warn_only);
    assert!(settings.ignore_packages.is_empty());
}

#[test]
fn installer_defaults() {
    let installer = InstallerConfig::default();
    assert_eq!(installer.callee, "meteorInstall");
    assert_eq!(installer.namespace_key, "node_modules");
    assert_eq!(installer.scope_key, "meteor");
}

#[test]
fn empty_object_yields_defaults() {
    let config = BridgeConfig::from_value(json!({})).unwrap();
    assert_eq!(config, BridgeConfig::default());
}

#[test]
fn partial_nested_table_keeps_other_defaults() {
    let config = BridgeConfig::from_value(json!({
        "stub_validation": { "disabled": true }
    }))
    .unwrap();
    assert!(config.stub_validation.disabled);
    assert!(config.stub_validation.warn_only);
}

#[test]
fn mode_is_lowercase() {
    let value = BridgeConfig {
        mode: BridgeMode::Ssr,
        ..Default::default()
    }
    .to_value()
    .unwrap();
    assert_eq!(value["mode"], "ssr");
    assert!(BridgeConfig::from_value(json!({ "mode": "SSR" })).is_err());
}

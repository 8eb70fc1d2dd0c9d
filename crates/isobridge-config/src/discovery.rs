//! File-based config discovery and layered loading for CLI use.
//!
//! Layers, lowest priority first:
//! 1. built-in defaults
//! 2. the discovered (or explicitly named) config file
//! 3. `ISOBRIDGE_*` environment variables, nested with `__`
//!    (`ISOBRIDGE_STUB_VALIDATION__WARN_ONLY=false`)

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::BridgeConfig;
use crate::error::{ConfigError, Result};
use crate::validation::validate;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ISOBRIDGE_";

const PACKAGE_JSON_FIELD: &str = "isobridge";

/// Searches for isobridge configuration files in a project root.
///
/// # Example
///
/// ```no_run
/// use isobridge_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load(None).unwrap();
/// println!("{}", config.runtime_installer);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory.
    ///
    /// Searches in this order:
    /// 1. isobridge.toml
    /// 2. isobridge.json
    /// 3. package.json (isobridge field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in ["isobridge.toml", "isobridge.json"] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Build the layered figment. `explicit` replaces discovery and must exist.
    pub fn figment(&self, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(BridgeConfig::default()));

        let file = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => self.find(),
        };

        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Serialized::defaults(read_config_file(&path)?));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate the configuration.
    pub fn load(&self, explicit: Option<&Path>) -> Result<BridgeConfig> {
        let config: BridgeConfig = self.figment(explicit)?.extract()?;
        validate(&config)?;
        Ok(config)
    }
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<BridgeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load(None)
}

/// Read one config file into a value with snake_case keys.
pub fn read_config_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let is_package_json = path.file_name() == Some(std::ffi::OsStr::new("package.json"));

    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            let toml_val: toml::Value = toml::from_str(&content)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid TOML in {}: {e}", path.display())))?;
            serde_json::to_value(toml_val)
                .map_err(|e| ConfigError::InvalidValue(format!("TOML to JSON conversion failed: {e}")))?
        }
        Some("json") => {
            let parsed: Value = serde_json::from_str(&content)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid JSON in {}: {e}", path.display())))?;
            if is_package_json {
                match parsed.get(PACKAGE_JSON_FIELD) {
                    Some(field) if !field.is_null() => field.clone(),
                    _ => {
                        return Err(ConfigError::SchemaValidation {
                            message: format!("{} has no '{PACKAGE_JSON_FIELD}' field", path.display()),
                            hint: Some(format!("Add an '{PACKAGE_JSON_FIELD}' object to package.json")),
                        });
                    }
                }
            } else {
                parsed
            }
        }
        other => {
            return Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ));
        }
    };

    Ok(snake_case_keys(value))
}

/// Rewrite object keys to snake_case so file and environment layers merge
/// onto the same keys.
fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_snake_case(&key), snake_case_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

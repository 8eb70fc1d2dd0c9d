//! Configuration for isobridge: stub validation, bridge mode, installer
//! shape and debug output, loaded from files and `ISOBRIDGE_*` variables.

pub mod config;
mod defaults;
pub mod discovery;
pub mod error;
pub mod settings;
pub mod validation;

pub use config::BridgeConfig;
pub use discovery::{ConfigDiscovery, ENV_PREFIX, discover, read_config_file};
pub use error::{ConfigError, Result};
pub use settings::{BridgeMode, InstallerConfig, StubValidationSettings};
pub use validation::validate;

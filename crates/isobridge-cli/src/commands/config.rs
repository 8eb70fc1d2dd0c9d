//! Config command implementation.

use isobridge_config::BridgeConfig;

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::Result;

/// Print the resolved configuration as TOML, or its JSON schema.
pub fn execute(args: ConfigArgs, config: &BridgeConfig) -> Result<()> {
    let text = if args.schema {
        serde_json::to_string_pretty(&BridgeConfig::json_schema())?
    } else {
        config.to_toml()?
    };
    utils::write_output(None, &text)
}

//! Shared utilities for command implementations.

use std::fs;
use std::io::Write;
use std::path::Path;

use isobridge_config::{BridgeConfig, ConfigDiscovery};
use isobridge_graph::PackageManifest;
use tracing::debug;

use crate::cli::ManifestArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Load configuration from an explicit file or by searching the current
/// directory, then apply `ISOBRIDGE_*` environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<BridgeConfig> {
    let cwd = std::env::current_dir()?;
    let discovery = ConfigDiscovery::new(&cwd);
    match explicit.map(Path::to_path_buf).or_else(|| discovery.find()) {
        Some(path) => debug!(path = %path.display(), "loading configuration"),
        None => debug!("no configuration file found, using defaults"),
    }
    Ok(discovery.load(explicit)?)
}

/// Build the package manifest from `--manifest` and the individual flags.
///
/// Flags override the corresponding manifest fields; `--lazy` paths are
/// appended.
pub fn load_manifest(args: &ManifestArgs) -> Result<PackageManifest> {
    let mut manifest = match &args.manifest {
        Some(path) => {
            let text = fs::read_to_string(path).with_path(path)?;
            serde_json::from_str(&text).map_err(|source| CliError::InvalidManifest {
                path: path.clone(),
                source,
            })?
        }
        None => PackageManifest::default(),
    };

    if let Some(main_module) = &args.main_module {
        manifest.main_module = Some(main_module.clone());
    }
    if let Some(package) = &args.package {
        manifest.package = Some(package.clone());
    }
    manifest.lazy_modules.extend(args.lazy.iter().cloned());
    Ok(manifest)
}

/// Read a bundle file.
pub fn read_bundle(path: &Path) -> Result<String> {
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Bundle is a directory: {}",
            path.display()
        )));
    }
    fs::read_to_string(path).with_path(path)
}

/// Write command output to `out`, or to stdout when no file is given.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, text).with_path(path)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

//! Debug snippet storage.
//!
//! Layout under the debug directory:
//!
//! ```text
//! <dir>/<package, ':' replaced by '_'>/package.js
//! <dir>/<package, ':' replaced by '_'>/<module path>/template.js
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use isobridge_stub::Stub;
use tracing::info;

use crate::error::{Result, ResultExt};

/// Files written for one stub.
#[derive(Debug)]
pub struct DebugSnippets {
    pub template: PathBuf,
    pub package: PathBuf,
}

/// Store the generated stub next to the bundle it was generated from.
pub fn store(dir: &Path, stub: &Stub, bundle_source: &str) -> Result<DebugSnippets> {
    let package_dir = dir.join(stub.package_id.fs_name());
    let template = confined(&package_dir, stub.module_path.as_str()).join("template.js");
    let package = package_dir.join("package.js");

    if let Some(parent) = template.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(&template, &stub.code).with_path(&template)?;
    fs::write(&package, bundle_source).with_path(&package)?;

    info!(
        template = %template.display(),
        package = %package.display(),
        "stored debug snippets"
    );
    Ok(DebugSnippets { template, package })
}

/// `base` joined with the normal components of `relative`, so the result
/// never leaves `base`.
fn confined(base: &Path, relative: &str) -> PathBuf {
    Path::new(relative)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

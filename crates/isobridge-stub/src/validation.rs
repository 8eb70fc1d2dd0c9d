//! Runtime export validation snippets.
//!
//! The snippet runs inside the stub right after the host loader returns the
//! module namespace. It compares the namespace's enumerable keys with the
//! export names found at parse time and throws a `ValidationMismatchError`
//! (or only warns) when they drift apart.

use isobridge_config::StubValidationSettings;

use crate::escape::{js_string, js_string_array};

/// What one validation snippet checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationTarget<'a> {
    pub package_id: &'a str,
    pub module_path: &'a str,
    pub request_id: Option<&'a str>,
    /// Local binding holding the loaded namespace.
    pub binding: &'a str,
    pub export_names: &'a [String],
    /// Strict mode also reports runtime keys that were never declared. It is
    /// turned off when the declared list is known to be incomplete.
    pub strict: bool,
}

/// Generates validation snippets for one settings value.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEmitter<'s> {
    settings: &'s StubValidationSettings,
}

impl<'s> ValidationEmitter<'s> {
    pub fn new(settings: &'s StubValidationSettings) -> Self {
        Self { settings }
    }

    pub fn is_enabled_for(&self, package_id: &str) -> bool {
        self.settings.is_enabled_for(package_id)
    }

    /// Snippet text, or an empty string when validation is off for the package.
    pub fn emit(&self, target: &ValidationTarget<'_>) -> String {
        if !self.is_enabled_for(target.package_id) {
            return String::new();
        }

        let options = format!(
            "{{ packageId: {}, modulePath: {}, requestId: {}, warnOnly: {}, strict: {} }}",
            js_string(target.package_id),
            js_string(target.module_path),
            target.request_id.map_or_else(|| "null".to_string(), js_string),
            self.settings.warn_only,
            target.strict,
        );

        format!(
            r#"(function (actual, expected, options) {{
  var keys = Object.keys(actual || {{}}).filter(function (key) {{ return key !== "__esModule"; }});
  var missing = expected.filter(function (name) {{ return keys.indexOf(name) === -1; }});
  var extra = options.strict ? keys.filter(function (key) {{ return expected.indexOf(key) === -1; }}) : [];
  if (!missing.length && !extra.length) return;
  var message = "[isobridge] exports of '" + options.packageId + "/" + options.modulePath + "' changed since the bundle was parsed"
    + (missing.length ? "; missing: " + missing.join(", ") : "")
    + (extra.length ? "; unexpected: " + extra.join(", ") : "")
    + (options.requestId ? " (request " + options.requestId + ")" : "");
  if (options.warnOnly) {{
    console.warn(message);
    return;
  }}
  var error = new Error(message);
  error.name = "ValidationMismatchError";
  throw error;
}})({binding}, {names}, {options});"#,
            binding = target.binding,
            names = js_string_array(target.export_names),
        )
    }
}

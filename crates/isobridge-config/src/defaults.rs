pub fn default_warn_only() -> bool {
    true
}

pub fn default_installer_callee() -> String {
    "meteorInstall".to_string()
}

pub fn default_namespace_key() -> String {
    "node_modules".to_string()
}

pub fn default_scope_key() -> String {
    "meteor".to_string()
}

pub fn default_runtime_installer() -> String {
    "Package.modules.meteorInstall".to_string()
}

pub fn default_bundle_prelude() -> String {
    "virtual:meteor-bundle".to_string()
}

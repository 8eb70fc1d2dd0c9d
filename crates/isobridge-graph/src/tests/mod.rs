mod property_tests;
mod smoke_tests;

/// Wrap package file entries in the standard installer call.
pub(crate) fn bundle(package: &str, files: &str) -> String {
    format!(
        r#"(function () {{
var Package = Package || {{}};
var require = Package.modules.meteorInstall({{"node_modules":{{"meteor":{{"{package}":{{{files}}}}}}}}}, {{
  "extensions": [".js", ".json"]
}});
return {{ require: require, eagerModulePaths: [] }};
}})();
"#
    )
}

//! Basic bundle parsing and graph queries example.
//!
//! This example demonstrates:
//! - Parsing a package bundle into a PackageGraph
//! - Iterating modules and their export surfaces
//! - Resolving deep-import requests and link targets
//! - Serializing the graph to JSON

use isobridge_graph::{ModulePath, PackageManifest, parse_bundle};

const BUNDLE: &str = r#"
(function () {
var require = Package.modules.meteorInstall({"node_modules":{"meteor":{"ostrio:cookies":{
  "cookies.js": function (require, exports, module) {
    module.link("./lib/util.js", { "*": "*" }, 0);
    module.export({ Cookies: () => Cookies });
    module.exportDefault(Cookies);
    class Cookies {}
  },
  "lib": {
    "util.js": function (require, exports, module) {
      module.export({ parse: () => parse, serialize: () => serialize });
    }
  }
}}}}, { "extensions": [".js", ".json"] });
})();
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest = PackageManifest::default().with_main_module("cookies.js");
    let graph = parse_bundle(BUNDLE, "packages/ostrio_cookies.js", &manifest)?;

    println!("Package {} ({} modules)", graph.package_id(), graph.len());
    for module in graph.modules() {
        let marker = if module.is_main_module() { " [main]" } else { "" };
        println!("  {}{marker}", module.path());
        for export in module.exports() {
            println!("    - {}", export.binding_key());
        }
    }

    // Deep imports tolerate a missing extension
    if let Some(util) = graph.resolve("lib/util") {
        println!("lib/util resolves to {}", graph.install_path(util.path()));
    }

    // Link targets are resolved relative to the importing module
    let from = ModulePath::new("cookies.js");
    if let Some(target) = graph.resolve_link(&from, "./lib/util.js") {
        println!("./lib/util.js from cookies.js -> {}", target.path());
    }

    println!("{}", graph.to_json()?);
    Ok(())
}

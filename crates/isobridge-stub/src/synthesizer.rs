//! Bridge module synthesis.
//!
//! A stub is an ES module that asks the host loader for one module of a
//! package and re-exports its namespace statically:
//!
//! ```text
//! let __isobridge0_m;
//! const __isobridge0_require = Package.modules.meteorInstall({
//!   "__isobridge_stub0.js": (require, exports, module) => {
//!     __isobridge0_m = require("/node_modules/meteor/pkg/main.js");
//!   }
//! }, { extensions: [".js"] });
//! __isobridge0_require("/__isobridge_stub0.js");
//!
//! const __isobridge0_x0 = __isobridge0_m.add; export { __isobridge0_x0 as add };
//! ```
//!
//! The synthetic file name carries the stub id so stubs never overwrite each
//! other in the loader's flat namespace.

use std::sync::Arc;

use isobridge_config::{BridgeConfig, BridgeMode, StubValidationSettings};
use isobridge_graph::{ModuleNode, ModulePath, PackageGraph, PackageId};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{Result, UnknownModulePathError};
use crate::escape::{is_valid_identifier, js_string, member_access};
use crate::stub_id::{StubId, StubIds};
use crate::validation::{ValidationEmitter, ValidationTarget};

/// One synthesis call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisRequest<'r> {
    /// Module to bridge: a package-relative path (`lib/util.js`), a package
    /// specifier (`meteor/ostrio:cookies/lib/util.js`) or `None` for the main
    /// module.
    pub import_path: Option<&'r str>,
    /// Caller's request id, echoed into the stub header and validation messages.
    pub request_id: Option<&'r str>,
}

impl<'r> SynthesisRequest<'r> {
    pub fn main_module() -> Self {
        Self::default()
    }

    pub fn module(import_path: &'r str) -> Self {
        Self {
            import_path: Some(import_path),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: &'r str) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// A synthesized bridge module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    pub id: StubId,
    /// ES module source text.
    pub code: String,
    pub package_id: PackageId,
    pub module_path: ModulePath,
    /// Names the stub exports, in emission order.
    pub export_names: Vec<String>,
    /// The module is only reachable through deep imports; callers should
    /// import the stub eagerly.
    pub lazy: bool,
}

/// Generates bridge modules from package graphs.
///
/// Holds no per-call state apart from the id counter, so one synthesizer can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct StubSynthesizer {
    ids: Arc<StubIds>,
    validation: StubValidationSettings,
    mode: BridgeMode,
    runtime_installer: String,
    bundle_prelude: String,
    namespace_key: String,
}

impl StubSynthesizer {
    /// Synthesizer with its own id counter.
    pub fn new(config: &BridgeConfig) -> Self {
        Self::with_ids(config, Arc::new(StubIds::new()))
    }

    /// Synthesizer drawing ids from a shared counter.
    pub fn with_ids(config: &BridgeConfig, ids: Arc<StubIds>) -> Self {
        Self {
            ids,
            validation: config.stub_validation.clone(),
            mode: config.mode,
            runtime_installer: config.runtime_installer.clone(),
            bundle_prelude: config.bundle_prelude.clone(),
            namespace_key: config.installer.namespace_key.clone(),
        }
    }

    pub fn ids(&self) -> &Arc<StubIds> {
        &self.ids
    }

    /// Find the module a request names.
    ///
    /// # Errors
    ///
    /// [`UnknownModulePathError`] listing every known path when nothing
    /// matches, including package-root requests for a package without a
    /// main module.
    pub fn resolve<'g>(
        &self,
        graph: &'g PackageGraph,
        import_path: Option<&str>,
    ) -> Result<&'g ModuleNode> {
        let raw = import_path.map(str::trim).unwrap_or_default();
        let unknown = |requested: &str| {
            UnknownModulePathError::new(
                graph.package_id().to_string(),
                requested,
                graph.known_paths(),
            )
        };

        if raw.is_empty() {
            return graph
                .main_module()
                .ok_or_else(|| unknown(graph.specifier_root()));
        }

        let found = match strip_package_prefix(graph, raw) {
            Some("") => graph.main_module(),
            Some(rest) => graph.resolve(rest).or_else(|| graph.resolve(raw)),
            None => graph.resolve(raw),
        };
        found.ok_or_else(|| unknown(raw))
    }

    /// Generate the stub for one request.
    pub fn synthesize(&self, graph: &PackageGraph, request: &SynthesisRequest<'_>) -> Result<Stub> {
        let node = self.resolve(graph, request.import_path)?;
        let id = self.ids.allocate();
        let prefix = format!("__isobridge{id}_");
        let namespace = format!("{prefix}m");
        let plan = self.plan_exports(graph, node);
        let package_id = graph.package_id().to_string();

        let mut header = Vec::new();
        if let Some(request_id) = request.request_id {
            header.push(format!("// requestId: {}", comment_text(request_id)));
        }
        header.push(format!("// packageId: {}", comment_text(&package_id)));
        header.push(format!("// module: {}", comment_text(node.path().as_str())));
        header.push(format!("// source path: {}", comment_text(graph.source_path())));

        let mut imports = Vec::new();
        if self.mode == BridgeMode::Ssr {
            imports.push(format!("import {};", js_string(&self.bundle_prelude)));
        }
        for specifier in &plan.passthrough {
            imports.push(format!("export * from {};", js_string(specifier)));
        }

        let validation = ValidationEmitter::new(&self.validation).emit(&ValidationTarget {
            package_id: &package_id,
            module_path: node.path().as_str(),
            request_id: request.request_id,
            binding: &namespace,
            export_names: &plan.names,
            strict: plan.complete,
        });

        let stub_file = format!("__isobridge_stub{id}.js");
        let mut factory_body = vec![format!(
            "    {namespace} = require({});",
            js_string(&graph.install_path(node.path()))
        )];
        factory_body.extend(validation.lines().map(|line| format!("    {line}")));

        let loader = format!(
            "let {namespace};\n\
             const {prefix}require = {installer}({{\n  \
               {file}: (require, exports, module) => {{\n\
             {body}\n  \
               }}\n\
             }}, {{ extensions: [\".js\"] }});\n\
             {prefix}require({entry});",
            installer = self.runtime_installer,
            file = js_string(&stub_file),
            body = factory_body.join("\n"),
            entry = js_string(&format!("/{stub_file}")),
        );

        let exports: Vec<String> = plan
            .names
            .iter()
            .enumerate()
            .map(|(index, name)| export_statement(&prefix, &namespace, index, name))
            .collect();

        let mut sections = vec![header.join("\n")];
        if !imports.is_empty() {
            sections.push(imports.join("\n"));
        }
        sections.push(loader);
        if !exports.is_empty() {
            sections.push(exports.join("\n"));
        }
        let mut code = sections.join("\n\n");
        code.push('\n');

        debug!(
            stub = %id,
            package = %package_id,
            module = %node.path(),
            exports = plan.names.len(),
            passthrough = plan.passthrough.len(),
            validated = !validation.is_empty(),
            "synthesized stub"
        );

        Ok(Stub {
            id,
            code,
            package_id: graph.package_id().clone(),
            module_path: node.path().clone(),
            export_names: plan.names,
            lazy: graph.is_lazy(node.path()),
        })
    }

    /// Work out the final export list of `node`.
    ///
    /// Names the module declares itself win over names forwarded by a `*`
    /// link, and every name is exported once.
    fn plan_exports(&self, graph: &PackageGraph, node: &ModuleNode) -> ExportPlan {
        let declared: FxHashSet<&str> = node.exported_names().collect();
        let mut plan = ExportPlan {
            names: Vec::new(),
            passthrough: Vec::new(),
            complete: true,
        };
        let mut emitted: FxHashSet<String> = FxHashSet::default();
        let mut visited: FxHashSet<ModulePath> = FxHashSet::default();
        visited.insert(node.path().clone());

        for descriptor in node.exports() {
            if let Some(name) = descriptor.exported_name() {
                if emitted.insert(name.to_string()) {
                    plan.names.push(name.to_string());
                }
                continue;
            }

            let Some(specifier) = descriptor.from_specifier() else {
                continue;
            };
            let mut forwarded = StarNames::default();
            if expand_star(graph, node.path(), specifier, &mut visited, &mut forwarded) {
                plan.complete &= forwarded.complete;
                for name in forwarded.names {
                    if !declared.contains(name.as_str()) && emitted.insert(name.clone()) {
                        plan.names.push(name);
                    }
                }
                for external in forwarded.external {
                    self.forward_external(&mut plan, node.path(), &external);
                }
            } else if is_relative(specifier) {
                debug!(module = %node.path(), specifier, "wildcard target missing from the package, skipping");
                plan.complete = false;
            } else {
                self.forward_external(&mut plan, node.path(), specifier);
            }
        }

        plan
    }

    /// Forward a wildcard target outside the package with `export *`.
    fn forward_external(&self, plan: &mut ExportPlan, from: &ModulePath, specifier: &str) {
        let specifier = self.bare_specifier(specifier);
        debug!(module = %from, specifier = %specifier, "forwarding wildcard re-export as export *");
        plan.complete = false;
        if !plan.passthrough.contains(&specifier) {
            plan.passthrough.push(specifier);
        }
    }

    /// `/node_modules/meteor/tracker` -> `meteor/tracker`
    fn bare_specifier(&self, specifier: &str) -> String {
        let install_prefix = format!("/{}/", self.namespace_key);
        specifier
            .strip_prefix(&install_prefix)
            .unwrap_or(specifier)
            .to_string()
    }
}

#[derive(Debug)]
struct ExportPlan {
    names: Vec<String>,
    /// Wildcard targets outside the package, forwarded with `export *`.
    passthrough: Vec<String>,
    /// False when some exported names could not be enumerated.
    complete: bool,
}

#[derive(Debug)]
struct StarNames {
    names: Vec<String>,
    /// Bare or other-package targets reached through nested `*` links.
    external: Vec<String>,
    complete: bool,
}

impl Default for StarNames {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            external: Vec::new(),
            complete: true,
        }
    }
}

/// Collect the names a `*` link from `from` to `specifier` forwards.
///
/// Returns false when the target is not a module of this package. Follows
/// the target's own `*` links; modules already visited contribute nothing,
/// which also breaks cycles. `default` is never forwarded. Nested targets
/// outside the package land in `out.external`.
fn expand_star(
    graph: &PackageGraph,
    from: &ModulePath,
    specifier: &str,
    visited: &mut FxHashSet<ModulePath>,
    out: &mut StarNames,
) -> bool {
    let Some(target) = graph.resolve_link(from, specifier) else {
        return false;
    };
    if !visited.insert(target.path().clone()) {
        return true;
    }

    for descriptor in target.exports() {
        match descriptor.exported_name() {
            Some("default") => {}
            Some(name) => out.names.push(name.to_string()),
            None => {
                let Some(inner) = descriptor.from_specifier() else {
                    continue;
                };
                if expand_star(graph, target.path(), inner, visited, out) {
                    continue;
                }
                out.complete = false;
                if is_relative(inner) {
                    debug!(module = %target.path(), specifier = inner, "nested wildcard target missing from the package, skipping");
                } else {
                    out.external.push(inner.to_string());
                }
            }
        }
    }
    true
}

fn export_statement(prefix: &str, namespace: &str, index: usize, name: &str) -> String {
    let access = member_access(namespace, name);
    if name == "default" {
        return format!("export default {access};");
    }
    let local = format!("{prefix}x{index}");
    let exported = if is_valid_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    };
    format!("const {local} = {access}; export {{ {local} as {exported} }};")
}

/// Strip a leading install root, specifier root or package id.
fn strip_package_prefix<'r>(graph: &PackageGraph, request: &'r str) -> Option<&'r str> {
    let package = graph.package_id().to_string();
    [graph.install_root(), graph.specifier_root(), package.as_str()]
        .into_iter()
        .find_map(|prefix| {
            let rest = request.strip_prefix(prefix)?;
            if rest.is_empty() {
                Some(rest)
            } else {
                rest.strip_prefix('/')
            }
        })
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." || specifier == ".."
}

/// Single-line text safe inside a `//` comment.
fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() || c == '\u{2028}' || c == '\u{2029}' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use isobridge_graph::{ExportDescriptor, InstallerShape, ModuleGraphModel, PackageManifest};

    fn graph() -> PackageGraph {
        let mut model = ModuleGraphModel::new(
            PackageId::parse("pkg").unwrap(),
            "packages/pkg.js",
            &InstallerShape::default(),
        );
        model.add_module("main.js".into(), vec![ExportDescriptor::named("add")]);
        model.add_module("lib/util.js".into(), vec![]);
        model.finish(&PackageManifest::default().with_main_module("main.js"))
    }

    #[test]
    fn resolves_every_request_spelling() {
        let synth = StubSynthesizer::new(&BridgeConfig::default());
        let graph = graph();
        for request in [
            None,
            Some(""),
            Some("main.js"),
            Some("./main"),
            Some("pkg"),
            Some("meteor/pkg"),
            Some("meteor/pkg/main.js"),
            Some("/node_modules/meteor/pkg/main.js"),
        ] {
            let node = synth.resolve(&graph, request).unwrap();
            assert_eq!(node.path().as_str(), "main.js", "request {request:?}");
        }
        assert_eq!(
            synth.resolve(&graph, Some("meteor/pkg/lib/util")).unwrap().path().as_str(),
            "lib/util.js"
        );
    }

    #[test]
    fn missing_module_lists_known_paths() {
        let synth = StubSynthesizer::new(&BridgeConfig::default());
        let err = synth.resolve(&graph(), Some("pkg/missing.js")).unwrap_err();
        assert_eq!(err.requested, "pkg/missing.js");
        assert_eq!(err.known_paths, vec!["main.js", "lib/util.js"]);
    }

    #[test]
    fn prefix_must_end_at_segment_boundary() {
        let synth = StubSynthesizer::new(&BridgeConfig::default());
        assert!(synth.resolve(&graph(), Some("meteor/pkgx/main.js")).is_err());
    }

    #[test]
    fn comment_text_is_single_line() {
        assert_eq!(comment_text("a\nb\u{2028}c"), "a b c");
    }
}

//! Smoke tests for bundle parsing.
//!
//! Fast, deterministic checks of the parse pipeline end to end. For
//! randomized checks of the same invariants see property_tests.rs (requires
//! the proptest feature).

use super::bundle;
use crate::{
    ExportDescriptor, GraphParser, InstallerShape, ModulePath, NestingLevel, PackageManifest,
    StructuredError, parse_bundle,
};

fn parse(source: &str) -> crate::PackageGraph {
    parse_bundle(source, "packages/test.js", &PackageManifest::default()).expect("bundle parses")
}

fn paths(graph: &crate::PackageGraph) -> Vec<String> {
    graph.known_paths()
}

#[test]
fn test_single_module_named_export() {
    let source = bundle(
        "pkg",
        r#""main.js": function (require, exports, module) {
            module.export({ add: () => add });
            function add(a, b) { return a + b; }
        }"#,
    );
    let graph = parse_bundle(
        &source,
        "packages/pkg.js",
        &PackageManifest::default().with_main_module("main.js"),
    )
    .unwrap();

    assert_eq!(graph.package_id().to_string(), "pkg");
    assert_eq!(graph.len(), 1);
    let main = graph.module(&ModulePath::new("main.js")).unwrap();
    assert_eq!(main.exports(), &[ExportDescriptor::named("add")]);
    assert!(main.is_main_module());
}

#[test]
fn test_nested_and_flattened_keys_normalize_identically() {
    let nested = parse(&bundle(
        "pkg",
        r#""lib": { "server": { "api.js": function (r, e, module) { module.export({ a: () => 1 }); } } }"#,
    ));
    let flattened = parse(&bundle(
        "pkg",
        r#""lib/server/api.js": function (r, e, module) { module.export({ a: () => 1 }); }"#,
    ));

    assert_eq!(paths(&nested), vec!["lib/server/api.js"]);
    assert_eq!(paths(&nested), paths(&flattened));
    assert_eq!(
        nested.modules().next().unwrap().exports(),
        flattened.modules().next().unwrap().exports()
    );
}

#[test]
fn test_parsing_twice_is_deep_equal() {
    let source = bundle(
        "ostrio:cookies",
        r#""cookies.js": function (require, exports, module) {
            module.link("./lib/util.js", { parse: "parse", "*": "*" }, 0);
            module.export({ Cookies: () => Cookies });
            module.exportDefault(Cookies);
        },
        "lib": { "util.js": function (require, exports, module) {
            module.export({ parse: () => parse, serialize: () => serialize });
        } }"#,
    );
    let manifest = PackageManifest::default()
        .with_main_module("cookies.js")
        .with_lazy_module("lib/util.js");

    let first = parse_bundle(&source, "a.js", &manifest).unwrap();
    let second = parse_bundle(&source, "a.js", &manifest).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_module_tree_order_is_preserved() {
    let graph = parse(&bundle(
        "pkg",
        r#""z.js": function () {}, "a.js": function () {}, "m": { "b.js": function () {} }"#,
    ));
    assert_eq!(paths(&graph), vec!["z.js", "a.js", "m/b.js"]);
}

#[test]
fn test_factory_forms() {
    let graph = parse(&bundle(
        "pkg",
        r#""fn.js": function module(require, exports, module) { module.export({ a: () => a }); },
        "arrow.js": (require, exports, m) => { m.export({ b: () => b }); },
        "deps.js": ["./fn.js", function (require, exports, module) { module.export({ c: () => c }); }],
        "alias.js": "./fn.js",
        "data.json": 42"#,
    ));

    assert_eq!(paths(&graph), vec!["fn.js", "arrow.js", "deps.js"]);
    let names = |path: &str| -> Vec<String> {
        graph
            .module(&ModulePath::new(path))
            .unwrap()
            .exported_names()
            .map(str::to_string)
            .collect()
    };
    assert_eq!(names("fn.js"), vec!["a"]);
    assert_eq!(names("arrow.js"), vec!["b"]);
    assert_eq!(names("deps.js"), vec!["c"]);
}

#[test]
fn test_duplicate_module_path_last_wins() {
    let graph = parse(&bundle(
        "pkg",
        r#""lib/a.js": function (r, e, module) { module.export({ first: () => 1 }); },
        "lib": { "a.js": function (r, e, module) { module.export({ second: () => 2 }); } }"#,
    ));
    assert_eq!(graph.len(), 1);
    let node = graph.module(&ModulePath::new("lib/a.js")).unwrap();
    assert_eq!(node.exports(), &[ExportDescriptor::named("second")]);
}

#[test]
fn test_main_and_lazy_come_from_manifest() {
    let source = bundle(
        "pkg",
        r#""client.js": function () {}, "lazy.js": function () {}"#,
    );
    let manifest = PackageManifest::default()
        .with_main_module("./client.js")
        .with_lazy_module("lazy.js")
        .with_lazy_module("does/not/exist.js");
    let graph = parse_bundle(&source, "pkg.js", &manifest).unwrap();

    assert_eq!(graph.main_module_path(), Some(&ModulePath::new("client.js")));
    let lazy: Vec<_> = graph.lazy_modules().map(ModulePath::as_str).collect();
    assert_eq!(lazy, vec!["lazy.js"]);

    let no_hint = parse(&source);
    assert!(no_hint.main_module_path().is_none());
    assert!(no_hint.resolve("").is_none());
}

#[test]
fn test_selects_package_from_manifest() {
    let source = r#"
        var require = meteorInstall({ node_modules: { meteor: {
            first: { "a.js": function (r, e, module) { module.export({ a: () => 1 }); } },
            second: { "b.js": function (r, e, module) { module.export({ b: () => 2 }); } }
        } } });
    "#;

    let default = parse(source);
    assert_eq!(default.package_id().to_string(), "first");

    let picked = parse_bundle(
        source,
        "multi.js",
        &PackageManifest::default().with_package("second"),
    )
    .unwrap();
    assert_eq!(picked.package_id().to_string(), "second");
    assert_eq!(paths(&picked), vec!["b.js"]);

    let err = parse_bundle(
        source,
        "multi.js",
        &PackageManifest::default().with_package("third"),
    )
    .unwrap_err();
    assert_eq!(err.level, NestingLevel::Package);
    assert!(err.found.contains("\"first\""));
    assert!(err.found.contains("\"second\""));
}

#[test]
fn test_custom_installer_shape() {
    let source = r#"install({ deps: { host: { "acme:widgets": {
        "index.js": function (require, exports, module) { module.exportDefault(1); }
    } } } });"#;
    let parser = GraphParser::new(InstallerShape {
        callee: "install".to_string(),
        namespace_key: "deps".to_string(),
        scope_key: "host".to_string(),
    });
    let graph = parser.parse(source, "w.js", &PackageManifest::default()).unwrap();
    assert_eq!(graph.install_root(), "/deps/host/acme:widgets");
    assert_eq!(graph.specifier_root(), "host/acme:widgets");
}

#[test]
fn test_syntax_error_is_malformed_bundle() {
    let err = parse_bundle("meteorInstall({", "broken.js", &PackageManifest::default())
        .unwrap_err();
    assert_eq!(err.level, NestingLevel::Syntax);
    assert_eq!(err.source_path, "broken.js");
}

#[test]
fn test_missing_installer_call() {
    let err = parse_bundle("var x = 1;", "plain.js", &PackageManifest::default()).unwrap_err();
    assert_eq!(err.level, NestingLevel::InstallerCall);
    assert!(err.expected.contains("meteorInstall"));
}

#[test]
fn test_shape_errors_name_level_and_keys() {
    let cases = [
        ("meteorInstall();", NestingLevel::InstallerArgument, "no arguments"),
        ("meteorInstall([]);", NestingLevel::InstallerArgument, "an array literal"),
        (
            r#"meteorInstall({ npm: {} });"#,
            NestingLevel::Namespace,
            "key \"npm\"",
        ),
        (
            r#"meteorInstall({ node_modules: { lib: {} } });"#,
            NestingLevel::HostScope,
            "key \"lib\"",
        ),
        (
            r#"meteorInstall({ node_modules: { meteor: {} } });"#,
            NestingLevel::Package,
            "an empty object",
        ),
        (
            r#"meteorInstall({ node_modules: { meteor: { pkg: "x" } } });"#,
            NestingLevel::Package,
            "string \"x\"",
        ),
        (
            r#"meteorInstall({ node_modules: { meteor: { "bad name": {} } } });"#,
            NestingLevel::Package,
            "key \"bad name\"",
        ),
    ];

    for (source, level, found) in cases {
        let err = parse_bundle(source, "shape.js", &PackageManifest::default()).unwrap_err();
        assert_eq!(err.level, level, "source: {source}");
        assert_eq!(err.found, found, "source: {source}");
    }
}

#[test]
fn test_module_tree_error_reports_depth_and_parent() {
    let source = bundle("pkg", r#""lib": { "server": { [name]: function () {} } }"#);
    let err = parse_bundle(&source, "tree.js", &PackageManifest::default()).unwrap_err();
    assert_eq!(
        err.level,
        NestingLevel::ModuleTree {
            depth: 2,
            parent: "lib/server".to_string(),
        }
    );
    assert_eq!(err.found, "a computed key");
    assert!(err.span.is_some());
}

#[test]
fn test_error_report_is_structured() {
    let err = parse_bundle(
        r#"meteorInstall({ node_modules: { npm: {} } });"#,
        "report.js",
        &PackageManifest::default(),
    )
    .unwrap_err();
    let report = err.report();
    assert_eq!(report.kind, "MalformedBundleError");
    assert_eq!(report.context["nesting"]["level"], "hostScope");
    assert_eq!(report.context["expected"], "key \"meteor\"");
    assert_eq!(report.context["found"], "key \"npm\"");
}

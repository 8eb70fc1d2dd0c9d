//! Property-based tests for bundle parsing using proptest.
//!
//! Run with: cargo test --features proptest --package isobridge-graph property_tests

#![cfg(feature = "proptest")]

use super::bundle;
use crate::{ModulePath, PackageManifest, parse_bundle};
use proptest::prelude::*;

/// Strategy for path segments: plain names, some with a `.js` suffix.
fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,7}", 1..=4).prop_map(|mut parts| {
        if let Some(last) = parts.last_mut() {
            last.push_str(".js");
        }
        parts
    })
}

/// Strategy for export names.
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,7}", 0..=6)
}

fn factory(names: &[String]) -> String {
    let getters: Vec<String> = names.iter().map(|n| format!("{n}: () => 0")).collect();
    format!(
        "function (require, exports, module) {{ module.export({{ {} }}); }}",
        getters.join(", ")
    )
}

/// `"a": { "b": { "c.js": fn } }`
fn nested_entry(segments: &[String], value: &str) -> String {
    match segments.split_first() {
        Some((last, [])) => format!(r#""{last}": {value}"#),
        Some((head, rest)) => format!(r#""{head}": {{ {} }}"#, nested_entry(rest, value)),
        None => String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: nested directory keys and one flattened key give the same path.
    #[test]
    fn prop_nested_equals_flattened(segments in segments_strategy(), names in names_strategy()) {
        let value = factory(&names);
        let nested = bundle("pkg", &nested_entry(&segments, &value));
        let flat = bundle("pkg", &format!(r#""{}": {value}"#, segments.join("/")));

        let nested = parse_bundle(&nested, "n.js", &PackageManifest::default()).unwrap();
        let flat = parse_bundle(&flat, "f.js", &PackageManifest::default()).unwrap();

        let expected = ModulePath::from_segments(&segments);
        prop_assert_eq!(nested.known_paths(), vec![expected.to_string()]);
        prop_assert_eq!(nested.known_paths(), flat.known_paths());
        prop_assert_eq!(
            nested.module(&expected).unwrap().exports(),
            flat.module(&expected).unwrap().exports()
        );
    }

    /// Property: parsing is a pure function of its input.
    #[test]
    fn prop_parse_is_idempotent(
        modules in prop::collection::vec((segments_strategy(), names_strategy()), 1..=5)
    ) {
        let entries: Vec<String> = modules
            .iter()
            .map(|(segments, names)| format!(r#""{}": {}"#, segments.join("/"), factory(names)))
            .collect();
        let source = bundle("scope:pkg", &entries.join(",\n"));
        let manifest = PackageManifest::default().with_main_module(modules[0].0.join("/"));

        let first = parse_bundle(&source, "p.js", &manifest).unwrap();
        let second = parse_bundle(&source, "p.js", &manifest).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.main_module().is_some());
    }

    /// Property: export names come back deduplicated in last-declaration order.
    #[test]
    fn prop_exports_last_write_wins(names in names_strategy()) {
        let source = bundle("pkg", &format!(r#""m.js": {}"#, factory(&names)));
        let graph = parse_bundle(&source, "m.js", &PackageManifest::default()).unwrap();
        let got: Vec<String> = graph
            .modules()
            .next()
            .unwrap()
            .exported_names()
            .map(str::to_string)
            .collect();

        let mut expected: Vec<String> = Vec::new();
        for name in &names {
            expected.retain(|n| n != name);
            expected.push(name.clone());
        }
        prop_assert_eq!(got, expected);
    }
}

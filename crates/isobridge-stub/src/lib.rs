//! ES module bridge synthesis for Meteor package graphs
//!
//! Given a [`PackageGraph`](isobridge_graph::PackageGraph) and a requested
//! module, [`StubSynthesizer`] emits an ES module that loads the module through
//! the Meteor runtime installer and re-exports every name the graph recorded
//! for it. Modern bundlers can then import Meteor packages statically.
//!
//! # Features
//!
//! - **Static named exports** - one export statement per known name, with
//!   string export names for keys that are not identifiers
//! - **Wildcard flattening** - `*` re-exports of modules in the same package
//!   are expanded to their names; other packages are forwarded with `export *`
//! - **Runtime validation** - an optional snippet compares the live namespace
//!   with the parsed export list
//! - **Thread-safe ids** - stubs synthesized concurrently never share an id
//!
//! # Example
//!
//! ```rust
//! use isobridge_config::BridgeConfig;
//! use isobridge_graph::{parse_bundle, PackageManifest};
//! use isobridge_stub::{StubSynthesizer, SynthesisRequest};
//!
//! let bundle = r#"
//! var require = Package.modules.meteorInstall({"node_modules":{"meteor":{"pkg":{
//!   "main.js": function (require, exports, module) {
//!     module.export({ a: () => a, b: () => b });
//!   }
//! }}}});
//! "#;
//! let manifest = PackageManifest::default().with_main_module("main.js");
//! let graph = parse_bundle(bundle, "packages/pkg.js", &manifest)?;
//!
//! let synthesizer = StubSynthesizer::new(&BridgeConfig::default());
//! let stub = synthesizer.synthesize(&graph, &SynthesisRequest::main_module())?;
//! assert_eq!(stub.export_names, ["a", "b"]);
//! assert!(stub.code.contains("export { __isobridge0_x0 as a }"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod escape;
pub mod stub_id;
pub mod synthesizer;
pub mod validation;

pub use error::{Result, UnknownModulePathError};
pub use stub_id::{StubId, StubIds};
pub use synthesizer::{Stub, StubSynthesizer, SynthesisRequest};
pub use validation::{ValidationEmitter, ValidationTarget};

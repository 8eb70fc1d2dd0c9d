//! Stub command implementation.

use std::time::Instant;

use isobridge_config::BridgeConfig;
use isobridge_graph::GraphParser;
use isobridge_stub::{StubSynthesizer, SynthesisRequest};
use tracing::debug;

use crate::cli::StubArgs;
use crate::commands::{debug as snippets, graph, utils};
use crate::error::Result;
use crate::ui;

/// Execute the stub command.
///
/// # Steps
///
/// 1. Parse the bundle into its package graph
/// 2. Synthesize the stub for the requested module
/// 3. Store debug snippets when a debug directory is set
/// 4. Write the stub to `--out` or stdout
pub fn execute(args: StubArgs, config: &BridgeConfig) -> Result<()> {
    let manifest = utils::load_manifest(&args.manifest)?;
    let parser = GraphParser::new(config.installer_shape());
    let source = utils::read_bundle(&args.bundle)?;
    let graph = graph::parse_source(&parser, &args.bundle, &source, &manifest)?;

    let started = Instant::now();
    let synthesizer = StubSynthesizer::new(config);
    let request = SynthesisRequest {
        import_path: args.specifier.as_deref(),
        request_id: args.request_id.as_deref(),
    };
    let stub = synthesizer.synthesize(&graph, &request)?;
    debug!(
        stub = %stub.id,
        module = %stub.module_path,
        exports = stub.export_names.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "synthesized stub"
    );

    if stub.lazy {
        ui::warning(&format!(
            "{} is a lazy module; import the stub eagerly so Meteor loads it",
            stub.module_path
        ));
    }

    if let Some(dir) = args.debug_dir.as_deref().or(config.debug_dir.as_deref()) {
        snippets::store(dir, &stub, &source)?;
    }

    utils::write_output(args.out.as_deref(), &stub.code)
}

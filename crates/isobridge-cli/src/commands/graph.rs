//! Graph command implementation.
//!
//! Parses bundles in parallel and prints their package graphs as JSON.

use std::path::Path;
use std::time::Instant;

use isobridge_config::BridgeConfig;
use isobridge_graph::{ErrorReport, GraphParser, PackageGraph, PackageManifest, StructuredError};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::cli::GraphArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// One bundle's outcome in a multi-bundle run.
#[derive(Debug, Serialize)]
pub struct GraphEntry {
    pub bundle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PackageGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Execute the graph command.
///
/// A single bundle prints its graph, or fails with the bundle diagnostic.
/// Several bundles print an array of entries and fail afterwards if any entry
/// carries an error.
pub fn execute(args: GraphArgs, config: &BridgeConfig) -> Result<()> {
    let manifest = utils::load_manifest(&args.manifest)?;
    let parser = GraphParser::new(config.installer_shape());

    if let [bundle] = args.bundles.as_slice() {
        let graph = parse_one(&parser, bundle, &manifest)?;
        let json = serde_json::to_string_pretty(&graph)?;
        return utils::write_output(args.out.as_deref(), &json);
    }

    let started = Instant::now();
    let entries: Vec<GraphEntry> = args
        .bundles
        .par_iter()
        .map(|bundle| entry_for(&parser, bundle, &manifest))
        .collect();
    debug!(
        bundles = entries.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parsed bundles"
    );

    let json = serde_json::to_string_pretty(&entries)?;
    utils::write_output(args.out.as_deref(), &json)?;

    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    if failed > 0 {
        for entry in entries.iter().filter(|entry| entry.error.is_some()) {
            ui::error(&format!("{} failed to parse", entry.bundle));
        }
        return Err(CliError::GraphFailures {
            failed,
            total: entries.len(),
        });
    }
    Ok(())
}

/// Parse one bundle file into its package graph.
pub fn parse_one(parser: &GraphParser, bundle: &Path, manifest: &PackageManifest) -> Result<PackageGraph> {
    let source = utils::read_bundle(bundle)?;
    parse_source(parser, bundle, &source, manifest)
}

/// Parse bundle text already read from `bundle`.
pub fn parse_source(
    parser: &GraphParser,
    bundle: &Path,
    source: &str,
    manifest: &PackageManifest,
) -> Result<PackageGraph> {
    let source_path = bundle.display().to_string();
    let started = Instant::now();
    let graph = parser
        .parse(source, &source_path, manifest)
        .map_err(|error| CliError::malformed_bundle(error, source))?;
    debug!(
        bundle = %source_path,
        package = %graph.package_id(),
        modules = graph.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parsed bundle"
    );
    Ok(graph)
}

fn entry_for(parser: &GraphParser, bundle: &Path, manifest: &PackageManifest) -> GraphEntry {
    let name = bundle.display().to_string();
    match parse_one(parser, bundle, manifest) {
        Ok(graph) => GraphEntry {
            bundle: name,
            graph: Some(graph),
            error: None,
        },
        Err(err) => GraphEntry {
            error: Some(report_for(&err, &name)),
            bundle: name,
            graph: None,
        },
    }
}

fn report_for(err: &CliError, bundle: &str) -> ErrorReport {
    match err {
        CliError::MalformedBundle { error, .. } => error.report(),
        other => ErrorReport {
            kind: "BundleReadError".to_string(),
            message: other.to_string(),
            context: json!({ "bundle": bundle }),
        },
    }
}

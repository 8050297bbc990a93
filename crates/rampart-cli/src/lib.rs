//! CLI logic for the Rampart threat-model tool.
//!
//! Reads a threat-model YAML document, derives and lays out the diagram on a
//! headless surface, and writes the positioned graph as JSON for an external
//! renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, future::ready, time::Duration};

use futures::executor::block_on;
use log::{info, warn};

use rampart::{
    DiagramBuilder, RampartError, export,
    layout::Outcome,
    surface::{FlowSurface, HeadlessSurface},
};

/// Run the Rampart CLI application
///
/// This function processes the input file through the full pipeline —
/// validation, graph derivation, headless measurement, layout — and writes
/// the positioned diagram to the output file.
///
/// # Errors
///
/// Returns `RampartError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document validation errors
/// - Graph derivation errors
/// - Layout readiness timeouts
/// - Export errors
pub fn run(args: &Args) -> Result<(), RampartError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing threat model"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Validate the document and derive the graph
    let builder = DiagramBuilder::new(app_config);
    let model = builder.parse(&source)?;
    let graph = builder.build_graph(&model)?;

    // Mount on a headless surface; measuring here plays the role of the
    // widget's first paint.
    let mut surface = HeadlessSurface::new();
    builder.mount(&graph, &mut surface);
    surface.measure_all();

    // Orchestrate the layout. The headless surface never needs to wait, so
    // an immediately-ready sleeper is enough.
    let mut orchestrator = builder.orchestrator();
    let outcome = block_on(orchestrator.run(&mut surface, |_: Duration| ready(())))?;
    if outcome == Outcome::LayoutFailed {
        warn!("Layout failed; exporting the diagram at default positions");
    }

    // Export the positioned diagram
    let nodes = surface.nodes();
    let edges = surface.edges();
    let json =
        export::json::diagram_to_json(&model.title, &nodes, &edges, builder.config().style())?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}

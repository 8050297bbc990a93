//! Rampart - attack-tree and threat-model diagram derivation and layout.
//!
//! Rampart turns a declarative YAML threat-model document into a directed
//! graph of facts, attacks, mitigations, goals, and boundaries, then
//! computes a layered left-to-right layout for it once the rendering surface
//! has measured its nodes.
//!
//! The rendering widget itself is external: anything implementing
//! [`surface::FlowSurface`] can host a diagram, and
//! [`surface::HeadlessSurface`] drives the pipeline without a widget at all.

pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod surface;

mod error;

pub use rampart_core::{color, flow, geometry, identifier, model};

pub use error::RampartError;

use log::{debug, info};

use config::AppConfig;
use graph::ThreatGraph;
use layout::{LayoutEngine, LayoutOrchestrator};
use model::ThreatModel;
use surface::FlowSurface;

/// Builder for deriving and laying out Rampart diagrams.
///
/// This provides an API for processing threat-model documents through
/// validation, graph derivation, mounting, and layout orchestration.
///
/// # Examples
///
/// ```rust,no_run
/// use rampart::{DiagramBuilder, config::AppConfig};
///
/// let source = "\
/// title: Login service
/// facts:
///   - password-reuse: Users reuse passwords
/// goals:
///   - account-takeover:
///     from:
///       - password-reuse
/// ";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Validate and normalize the document
/// let model = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Derive the directed graph
/// let graph = builder.build_graph(&model)
///     .expect("Failed to build graph");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate YAML source into a normalized threat model.
    ///
    /// # Errors
    ///
    /// Returns `RampartError::Document` carrying every diagnostic when the
    /// source is not valid YAML or violates the document schema. An invalid
    /// document never yields a partial model.
    pub fn parse(&self, source: &str) -> Result<ThreatModel, RampartError> {
        info!("Parsing threat-model document");

        let model = rampart_doc::decode_str(source)
            .map_err(|err| RampartError::new_document_error(err, source))?;

        debug!(entities = model.len(), title = model.title.as_str(); "Document parsed successfully");
        Ok(model)
    }

    /// Derive the directed graph from a validated model.
    ///
    /// When the layout configuration designates a root entity, its node gets
    /// the narrower root vertex size as an explicit layout hint.
    ///
    /// # Errors
    ///
    /// Returns `RampartError::Graph` on duplicate names or dangling origin
    /// references; construction aborts rather than producing a partial,
    /// misleading diagram.
    pub fn build_graph(&self, model: &ThreatModel) -> Result<ThreatGraph, RampartError> {
        info!("Deriving attack-tree graph");
        let mut graph = ThreatGraph::from_model(model)?;

        if let Some(root) = self.config.layout().root() {
            let hint = self.config.layout().root_node_size();
            if graph.set_layout_hint(root, hint) {
                debug!(root; "Applied root layout hint");
            } else {
                debug!(root; "Configured root entity not present in document");
            }
        }

        Ok(graph)
    }

    /// Mount a derived graph onto a rendering surface.
    ///
    /// Nodes are handed over at their default zero positions; the surface
    /// measures them asynchronously and the orchestrator commits final
    /// positions later.
    pub fn mount<S: FlowSurface>(&self, graph: &ThreatGraph, surface: &mut S) {
        surface.set_nodes(graph.flow_nodes());
        surface.set_edges(graph.flow_edges());
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Diagram mounted at default positions"
        );
    }

    /// Create the layout orchestrator for one diagram mount.
    ///
    /// The orchestrator is a one-shot controller; keep it alive for the
    /// mount's lifetime and call
    /// [`run`](layout::LayoutOrchestrator::run) on it once the surface
    /// exists.
    pub fn orchestrator(&self) -> LayoutOrchestrator<LayoutEngine> {
        LayoutOrchestrator::new(self.config.layout().engine())
            .with_policy(self.config.layout().poll_policy())
    }
}

//! Deriving the directed attack-tree graph from a threat model.
//!
//! The builder walks the validated document once, producing one visual node
//! per entity and one visual edge per (destination, origin) pair, with the
//! `backwards` convention resolved into final source/target order. The
//! result is held in a petgraph [`DiGraph`] so parallel edges between the
//! same pair of entities survive; display ids are derived per edge and are
//! allowed to collide.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use thiserror::Error;

use rampart_core::{
    flow::{FlowEdge, FlowNode},
    geometry::Size,
    identifier::Id,
    model::ThreatModel,
};

/// Data-integrity errors raised while deriving the graph.
///
/// Both variants are fatal: a diagram built from an inconsistent document
/// would silently misrepresent the threat model, so construction aborts and
/// nothing reaches the rendering surface.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two entities share a name. The decoder validates this first; the
    /// builder re-checks because it is the component that actually keys
    /// nodes by name.
    #[error("duplicate entity name `{name}`")]
    DuplicateName {
        /// The colliding name.
        name: Id,
    },

    /// An origin references a name absent from the combined entity set.
    #[error("`{destination}` references unknown entity `{origin}`")]
    DanglingReference {
        /// The missing name.
        origin: Id,
        /// The entity whose `from` list holds the reference.
        destination: Id,
    },
}

/// Per-edge payload stored in the graph.
#[derive(Debug, Clone)]
struct EdgeData {
    display_id: String,
    label: Option<String>,
    origin: usize,
}

/// The derived attack-tree graph for one document load.
///
/// Built wholesale from a [`ThreatModel`] and never patched incrementally;
/// a new document load builds a new graph. Node and edge iteration order is
/// insertion order, so repeated builds from the same document are
/// structurally identical.
#[derive(Debug)]
pub struct ThreatGraph {
    graph: DiGraph<FlowNode, EdgeData>,
    node_indices: HashMap<Id, NodeIndex>,
}

impl ThreatGraph {
    /// Derives the graph from a validated threat model.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] on a duplicate entity name or a dangling
    /// origin reference; no partial graph is produced.
    pub fn from_model(model: &ThreatModel) -> Result<Self, GraphError> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for entity in model.entities() {
            let node = FlowNode::from(entity);
            let name = node.id;
            let idx = graph.add_node(node);
            if node_indices.insert(name, idx).is_some() {
                return Err(GraphError::DuplicateName { name });
            }
        }

        for entity in model.entities() {
            let destination = entity.name;
            let destination_idx = node_indices[&destination];

            for (origin_idx, origin) in entity.origins.iter().enumerate() {
                let Some(&source_idx) = node_indices.get(&origin.name) else {
                    return Err(GraphError::DanglingReference {
                        origin: origin.name,
                        destination,
                    });
                };

                // `backwards` swaps the visual arrow; the document still
                // reads "destination is caused by origin".
                let (from, to, display_id) = if origin.backwards {
                    (
                        destination_idx,
                        source_idx,
                        format!("{destination}-{}", origin.name),
                    )
                } else {
                    (
                        source_idx,
                        destination_idx,
                        format!("{}-{destination}", origin.name),
                    )
                };

                trace!(edge = display_id, backwards = origin.backwards; "Adding edge");
                graph.add_edge(
                    from,
                    to,
                    EdgeData {
                        display_id,
                        label: origin.label.clone(),
                        origin: origin_idx,
                    },
                );
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Graph derived from threat model"
        );

        Ok(Self {
            graph,
            node_indices,
        })
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up a node by entity name.
    pub fn node(&self, name: &str) -> Option<&FlowNode> {
        let idx = self.node_indices.get(&Id::new(name))?;
        self.graph.node_weight(*idx)
    }

    /// Attaches a layout-size override to the named node, returning `false`
    /// when no such node exists.
    pub fn set_layout_hint(&mut self, name: &str, hint: Size) -> bool {
        let Some(&idx) = self.node_indices.get(&Id::new(name)) else {
            return false;
        };
        self.graph[idx].layout_hint = Some(hint);
        true
    }

    /// The surface-facing node list, in derivation order.
    pub fn flow_nodes(&self) -> Vec<FlowNode> {
        self.graph.node_weights().cloned().collect()
    }

    /// The surface-facing edge list, in derivation order.
    pub fn flow_edges(&self) -> Vec<FlowEdge> {
        self.graph
            .edge_references()
            .map(|edge| {
                let data = edge.weight();
                FlowEdge {
                    id: data.display_id.clone(),
                    source: self.graph[edge.source()].id,
                    target: self.graph[edge.target()].id,
                    label: data.label.clone(),
                    origin: data.origin,
                }
            })
            .collect()
    }
}

//! Layout engine and orchestration for attack-tree diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Threat Model
//!     ↓ graph
//! ThreatGraph (nodes + edges, positions zero)
//!     ↓ [rendering widget mounts and measures nodes]
//!     ↓ orchestrator (this module) polls for measurements
//!     ↓ engine (this module) computes a layered layout
//! Positioned nodes, committed back to the widget
//! ```
//!
//! The engine wraps a layered (Sugiyama-style) algorithm behind one
//! asynchronous call; the orchestrator defers that call until the rendering
//! surface has measured every node, then commits positions and requests a
//! single viewport fit.

mod engine;
mod orchestrator;

pub use engine::LayoutEngine;
pub use orchestrator::{LayoutOrchestrator, Outcome, Phase, PollPolicy};

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use rampart_core::flow::{FlowEdge, FlowNode};

/// Direction the layout's primary (rank) axis runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ranks progress left to right; arrows point rightward.
    #[default]
    Right,
    /// Ranks progress top to bottom; arrows point downward.
    Down,
}

/// Errors raised by the layout step.
///
/// Layout failures are isolated: callers log them and keep the diagram at
/// its pre-layout positions instead of tearing down the view.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layered-layout algorithm failed or panicked.
    #[error("layout engine failed: {0}")]
    Engine(String),

    /// Node measurements did not arrive within the polling budget.
    #[error("nodes were not measured within {waited_ms} ms")]
    ReadinessTimeout {
        /// Total wait accumulated across poll ticks.
        waited_ms: u64,
    },
}

/// A layout algorithm behind a single asynchronous call.
///
/// The orchestrator is generic over this seam so tests can substitute a
/// probe implementation; [`LayoutEngine`] is the production implementation.
pub trait GraphLayout {
    /// Computes positions for `nodes` given `edges`, returning the same
    /// nodes with positions updated. Nodes the algorithm has no opinion on
    /// are returned unchanged.
    fn layout(
        &self,
        nodes: Vec<FlowNode>,
        edges: &[FlowEdge],
    ) -> impl Future<Output = Result<Vec<FlowNode>, LayoutError>>;
}

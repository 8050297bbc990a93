//! The rendering-surface interface and a headless implementation.
//!
//! The diagram widget itself is an external collaborator: it renders nodes
//! and edges, measures them after its first paint, and exposes a viewport.
//! This crate only depends on the narrow [`FlowSurface`] contract below.
//!
//! [`HeadlessSurface`] implements the contract without a widget: it measures
//! labels with a deterministic character-count heuristic, which is enough to
//! drive the full pipeline from a CLI or a test.

use log::debug;

use rampart_core::{
    flow::{FlowEdge, FlowNode},
    geometry::Size,
};

/// The operations the layout pipeline needs from a rendering widget.
///
/// Nodes handed to `set_nodes` are owned by the surface afterwards; the
/// surface reports measured sizes through the snapshots returned from
/// `nodes`.
pub trait FlowSurface {
    /// `true` once viewport metrics (fonts, container size) are settled.
    fn viewport_initialized(&self) -> bool;

    /// Snapshot of the current nodes, including any measured sizes.
    fn nodes(&self) -> Vec<FlowNode>;

    /// Snapshot of the current edges.
    fn edges(&self) -> Vec<FlowEdge>;

    /// Replace the node collection (used to mount and to commit positions).
    fn set_nodes(&mut self, nodes: Vec<FlowNode>);

    /// Replace the edge collection.
    fn set_edges(&mut self, edges: Vec<FlowEdge>);

    /// Request that the viewport be fitted to the diagram's content.
    fn fit_view(&mut self);
}

/// Font size assumed by the headless measurement heuristic.
const FONT_SIZE: f32 = 14.0;
/// Average glyph width as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Horizontal and vertical padding inside a node box.
const NODE_PADDING: f32 = 12.0;

/// A widgetless [`FlowSurface`] for CLI use and tests.
///
/// The viewport counts as initialized once a graph is mounted. Measurement
/// is explicit: call [`HeadlessSurface::measure_all`] to fill node sizes
/// from the label heuristic, standing in for the widget's first paint.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    mounted: bool,
    fit_view_requests: u32,
}

impl HeadlessSurface {
    /// Create an empty, unmounted surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a node/edge collection, initializing the viewport.
    pub fn mount(&mut self, nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) {
        debug!(nodes = nodes.len(), edges = edges.len(); "Mounting diagram on headless surface");
        self.nodes = nodes;
        self.edges = edges;
        self.mounted = true;
    }

    /// Measure every node from its label, like a widget paint would.
    pub fn measure_all(&mut self) {
        for node in &mut self.nodes {
            node.size = Some(measure_label(&node.label));
        }
    }

    /// Number of `fit_view` requests received so far.
    pub fn fit_view_requests(&self) -> u32 {
        self.fit_view_requests
    }
}

impl FlowSurface for HeadlessSurface {
    fn viewport_initialized(&self) -> bool {
        self.mounted
    }

    fn nodes(&self) -> Vec<FlowNode> {
        self.nodes.clone()
    }

    fn edges(&self) -> Vec<FlowEdge> {
        self.edges.clone()
    }

    fn set_nodes(&mut self, nodes: Vec<FlowNode>) {
        self.nodes = nodes;
    }

    fn set_edges(&mut self, edges: Vec<FlowEdge>) {
        self.edges = edges;
    }

    fn fit_view(&mut self) {
        self.fit_view_requests += 1;
    }
}

/// Deterministic single-line text measurement: widest line sets the width,
/// line count sets the height.
fn measure_label(label: &str) -> Size {
    let lines: Vec<&str> = label.split('\n').collect();
    let max_chars = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);

    let width = max_chars as f32 * FONT_SIZE * CHAR_WIDTH_FACTOR + 2.0 * NODE_PADDING;
    let height = lines.len() as f32 * FONT_SIZE * LINE_HEIGHT_FACTOR + 2.0 * NODE_PADDING;
    Size::new(width, height)
}

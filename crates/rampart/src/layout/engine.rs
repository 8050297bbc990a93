//! Layered layout engine for attack-tree diagrams.
//!
//! Wraps the rust-sugiyama implementation of layered drawing (rank
//! assignment, crossing minimization, coordinate assignment) behind the
//! [`GraphLayout`] seam. The adapter owns everything the algorithm does not:
//! sizing vertices from measured node extents, merging parallel arcs,
//! normalizing the rank orientation to the configured direction, stacking
//! disconnected components, and converting center coordinates to top-left
//! anchored positions.

use std::{
    collections::{HashMap, HashSet},
    panic,
};

use log::{debug, trace};
use rand::RngExt;
use rust_sugiyama::configure::Config;

use rampart_core::{
    flow::{FlowEdge, FlowNode},
    geometry::{Point, Size},
    identifier::Id,
};

use super::{Direction, GraphLayout, LayoutError};

/// The layered layout engine.
///
/// Spacing defaults mirror the diagram conventions this crate was built
/// around: 40 between layers, 80 between nodes, 30 of edge clearance, and a
/// 330×75 default vertex for nodes that carry no measurement yet.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    direction: Direction,
    node_spacing: f32,
    layer_spacing: f32,
    edge_spacing: f32,
    default_size: Size,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Create a new engine with default direction and spacing.
    pub fn new() -> Self {
        Self {
            direction: Direction::Right,
            node_spacing: 80.0,
            layer_spacing: 40.0,
            edge_spacing: 30.0,
            default_size: Size::new(330.0, 75.0),
        }
    }

    /// Set the direction of the primary (rank) axis.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the spacing between nodes within a layer.
    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Set the spacing between adjacent layers.
    pub fn with_layer_spacing(mut self, spacing: f32) -> Self {
        self.layer_spacing = spacing;
        self
    }

    /// Set the clearance reserved for edges between stacked components.
    pub fn with_edge_spacing(mut self, spacing: f32) -> Self {
        self.edge_spacing = spacing;
        self
    }

    /// Set the vertex size used for nodes with no measurement and no hint.
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    /// The extent the algorithm should reserve for a node: explicit hint,
    /// else the measured size, else the configured default.
    fn effective_size(&self, node: &FlowNode) -> Size {
        node.layout_hint.or(node.size).unwrap_or(self.default_size)
    }

    /// Splits a size into (rank-axis extent, cross-axis extent) under the
    /// configured direction.
    fn oriented(&self, size: Size) -> (f32, f32) {
        match self.direction {
            Direction::Right => (size.width(), size.height()),
            Direction::Down => (size.height(), size.width()),
        }
    }

    fn solve(&self, nodes: &mut [FlowNode], edges: &[FlowEdge]) -> Result<(), LayoutError> {
        // Dense u32 vertex ids for the algorithm; the id is the node's index.
        let vertex_ids: HashMap<Id, u32> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id, index as u32))
            .collect();

        // Merge parallel arcs and skip self-loops before handing the graph
        // to the algorithm.
        let mut seen = HashSet::new();
        let mut arcs: Vec<(u32, u32)> = Vec::new();
        for edge in edges {
            let (Some(&source), Some(&target)) =
                (vertex_ids.get(&edge.source), vertex_ids.get(&edge.target))
            else {
                trace!(edge = edge.id; "Skipping arc with endpoint outside the node set");
                continue;
            };
            if source == target {
                continue;
            }
            if seen.insert((source, target)) {
                arcs.push((source, target));
            }
        }

        if arcs.is_empty() {
            debug!("Graph has no arcs; leaving node positions untouched");
            return Ok(());
        }

        let sizes: Vec<Size> = nodes.iter().map(|node| self.effective_size(node)).collect();
        let avg_extent = sizes
            .iter()
            .map(|s| (s.width() + s.height()) / 2.0)
            .sum::<f32>()
            / sizes.len() as f32;

        debug!(
            nodes = nodes.len(),
            arcs = arcs.len();
            "Applying layered layout algorithm"
        );

        // The algorithm may panic on degenerate input; contain it and report
        // an engine failure instead of poisoning the caller.
        let algo_arcs = arcs.clone();
        let layouts = panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: (avg_extent as f64 / 50.0).clamp(2.0, 5.0),
                ..Default::default()
            };
            rust_sugiyama::from_edges(&algo_arcs, &config)
        });

        let results = match layouts {
            Ok(results) if !results.is_empty() => results,
            Ok(_) => {
                return Err(LayoutError::Engine(
                    "layered layout returned no results".to_string(),
                ));
            }
            Err(payload) => {
                let message = if let Some(msg) = payload.downcast_ref::<String>() {
                    format!("layered layout panicked: {msg}")
                } else if let Some(msg) = payload.downcast_ref::<&str>() {
                    format!("layered layout panicked: {msg}")
                } else {
                    "layered layout panicked with unknown error".to_string()
                };
                return Err(LayoutError::Engine(message));
            }
        };

        // Collect raw coordinates per connected component. The library lays
        // ranks along its own y axis; which sign means "deeper" is an
        // internal detail that gets normalized below.
        let mut components: Vec<Vec<(usize, f32, f32)>> = Vec::new();
        for (coords, _, _) in &results {
            let mut component = Vec::new();
            for &(id, (x, y)) in coords {
                let index = id as usize;
                if index >= nodes.len() {
                    debug!(vertex = index; "Discarding out-of-range vertex from layout result");
                    continue;
                }
                component.push((index, y as f32, x as f32));
            }
            if !component.is_empty() {
                components.push(component);
            }
        }

        // Normalize rank orientation: arrows must flow toward increasing
        // rank, whatever sign convention the algorithm used.
        let rank_of: HashMap<usize, f32> = components
            .iter()
            .flatten()
            .map(|&(index, rank, _)| (index, rank))
            .collect();
        let mut source_ranks = 0.0f32;
        let mut target_ranks = 0.0f32;
        for &(source, target) in &arcs {
            if let (Some(&rs), Some(&rt)) = (
                rank_of.get(&(source as usize)),
                rank_of.get(&(target as usize)),
            ) {
                source_ranks += rs;
                target_ranks += rt;
            }
        }
        let flip = source_ranks > target_ranks;

        // Scale steps from the configured spacing plus the actual node
        // extents, so large nodes cannot overlap their neighbors.
        let max_rank_extent = sizes
            .iter()
            .map(|&s| self.oriented(s).0)
            .fold(0.0f32, f32::max);
        let max_cross_extent = sizes
            .iter()
            .map(|&s| self.oriented(s).1)
            .fold(0.0f32, f32::max);
        let rank_step = self.layer_spacing + max_rank_extent;
        let cross_step = self.node_spacing + max_cross_extent * 0.5;

        // Scaled center positions, with disconnected components stacked
        // along the cross axis.
        let mut centers: HashMap<usize, (f32, f32)> = HashMap::new();
        let mut cross_offset = 0.0f32;
        for component in &components {
            let min_rank = component
                .iter()
                .map(|&(_, rank, _)| if flip { -rank } else { rank })
                .fold(f32::INFINITY, f32::min);
            let min_cross = component
                .iter()
                .map(|&(_, _, cross)| cross)
                .fold(f32::INFINITY, f32::min);

            let mut component_cross_end = cross_offset;
            for &(index, raw_rank, raw_cross) in component {
                let rank = (if flip { -raw_rank } else { raw_rank }) - min_rank;
                let cross = raw_cross - min_cross;
                let rank_center = rank * rank_step;
                let cross_center = cross * cross_step + cross_offset;
                component_cross_end = component_cross_end.max(cross_center);
                centers.insert(index, (rank_center, cross_center));
            }
            cross_offset = component_cross_end + max_cross_extent + self.edge_spacing + self.node_spacing;
        }

        // Shift so no node's top-left anchor lands at negative coordinates.
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        for (&index, &(rank_center, cross_center)) in &centers {
            let size = sizes[index];
            let (cx, cy) = self.to_xy(rank_center, cross_center);
            min_x = min_x.min(cx - size.width() / 2.0);
            min_y = min_y.min(cy - size.height() / 2.0);
        }
        let shift_x = min_x.min(0.0);
        let shift_y = min_y.min(0.0);

        // Commit top-left anchored positions. The sub-pixel jitter on x
        // breaks perfectly coincident repeated layouts without ever
        // affecting edge connectivity.
        let positioned = centers.len();
        let mut rng = rand::rng();
        for (index, (rank_center, cross_center)) in centers {
            let size = sizes[index];
            let (cx, cy) = self.to_xy(rank_center, cross_center);
            let jitter = rng.random::<f32>() / 1000.0;
            nodes[index].position = Point::new(
                cx - shift_x - size.width() / 2.0 + jitter,
                cy - shift_y - size.height() / 2.0,
            );
        }

        debug!(positioned, total = nodes.len(); "Layered layout computed");
        Ok(())
    }

    /// Maps (rank-axis, cross-axis) coordinates to (x, y).
    fn to_xy(&self, rank: f32, cross: f32) -> (f32, f32) {
        match self.direction {
            Direction::Right => (rank, cross),
            Direction::Down => (cross, rank),
        }
    }
}

impl GraphLayout for LayoutEngine {
    async fn layout(
        &self,
        mut nodes: Vec<FlowNode>,
        edges: &[FlowEdge],
    ) -> Result<Vec<FlowNode>, LayoutError> {
        self.solve(&mut nodes, edges)?;
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use rampart_core::model::Category;

    use super::*;

    fn node(name: &str, width: f32) -> FlowNode {
        let mut node = FlowNode::new(Id::new(name), name, Category::Attack);
        node.size = Some(Size::new(width, 75.0));
        node
    }

    fn edge(source: &str, target: &str) -> FlowEdge {
        FlowEdge {
            id: format!("{source}-{target}"),
            source: Id::new(source),
            target: Id::new(target),
            label: None,
            origin: 0,
        }
    }

    fn position_of<'a>(nodes: &'a [FlowNode], name: &str) -> &'a FlowNode {
        nodes.iter().find(|n| n.id == name).expect("node must exist")
    }

    #[test]
    fn test_chain_orders_along_primary_axis() {
        let nodes = vec![node("a", 120.0), node("b", 120.0), node("g", 120.0)];
        let edges = vec![edge("a", "b"), edge("b", "g")];

        let engine = LayoutEngine::new();
        let positioned = block_on(engine.layout(nodes, &edges)).unwrap();

        let a = position_of(&positioned, "a").position;
        let b = position_of(&positioned, "b").position;
        let g = position_of(&positioned, "g").position;

        assert!(g.x() > b.x(), "goal must lie beyond the attack: {g:?} vs {b:?}");
        assert!(b.x() > a.x(), "attack must lie beyond the fact: {b:?} vs {a:?}");
        for n in &positioned {
            assert!(n.position.x() >= 0.0);
            assert!(n.position.y() >= 0.0);
        }
    }

    #[test]
    fn test_down_direction_orders_along_y() {
        let nodes = vec![node("a", 120.0), node("b", 120.0)];
        let edges = vec![edge("a", "b")];

        let engine = LayoutEngine::new().with_direction(Direction::Down);
        let positioned = block_on(engine.layout(nodes, &edges)).unwrap();

        let a = position_of(&positioned, "a").position;
        let b = position_of(&positioned, "b").position;
        assert!(b.y() > a.y());
    }

    #[test]
    fn test_isolated_node_keeps_prior_position() {
        let mut island = node("island", 100.0);
        island.position = Point::new(5.0, 7.0);
        let nodes = vec![node("a", 100.0), node("b", 100.0), island];
        let edges = vec![edge("a", "b")];

        let engine = LayoutEngine::new();
        let positioned = block_on(engine.layout(nodes, &edges)).unwrap();

        let island = position_of(&positioned, "island");
        assert_eq!(island.position, Point::new(5.0, 7.0));
    }

    #[test]
    fn test_no_edges_leaves_everything_untouched() {
        let mut a = node("a", 100.0);
        a.position = Point::new(1.0, 2.0);
        let b = node("b", 100.0);

        let engine = LayoutEngine::new();
        let positioned = block_on(engine.layout(vec![a.clone(), b.clone()], &[])).unwrap();

        assert_eq!(positioned[0].position, a.position);
        assert_eq!(positioned[1].position, b.position);
    }

    #[test]
    fn test_parallel_arcs_and_self_loops_are_tolerated() {
        let nodes = vec![node("a", 100.0), node("b", 100.0)];
        let edges = vec![edge("a", "b"), edge("a", "b"), edge("a", "a")];

        let engine = LayoutEngine::new();
        let positioned = block_on(engine.layout(nodes, &edges)).unwrap();

        let a = position_of(&positioned, "a").position;
        let b = position_of(&positioned, "b").position;
        assert!(b.x() > a.x());
    }

    #[test]
    fn test_jitter_stays_sub_pixel() {
        let nodes = vec![node("a", 100.0), node("b", 100.0)];
        let edges = vec![edge("a", "b")];

        let engine = LayoutEngine::new();
        let first = block_on(engine.layout(nodes.clone(), &edges)).unwrap();
        let second = block_on(engine.layout(nodes, &edges)).unwrap();

        for name in ["a", "b"] {
            let p1 = position_of(&first, name).position;
            let p2 = position_of(&second, name).position;
            assert!((p1.x() - p2.x()).abs() < 1.0e-2);
            assert_eq!(p1.y(), p2.y());
        }
    }

    #[test]
    fn test_unmeasured_nodes_fall_back_to_defaults() {
        // No size, no hint: the configured default keeps the layout usable.
        let unmeasured: Vec<FlowNode> = ["a", "b"]
            .iter()
            .map(|name| FlowNode::new(Id::new(name), *name, Category::Fact))
            .collect();
        let edges = vec![edge("a", "b")];

        let engine = LayoutEngine::new().with_default_size(Size::new(200.0, 50.0));
        let positioned = block_on(engine.layout(unmeasured, &edges)).unwrap();

        let a = position_of(&positioned, "a").position;
        let b = position_of(&positioned, "b").position;
        assert!(b.x() > a.x());
    }
}

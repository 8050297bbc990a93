//! Node and edge shapes exchanged with the rendering surface.
//!
//! These are plain data records: the rendering widget owns them after
//! mounting, reports measured sizes back through them, and receives final
//! positions through them. They are serializable so a positioned diagram can
//! be exported for any external renderer.

use serde::Serialize;

use crate::{
    geometry::{Point, Size},
    identifier::Id,
    model::{Category, Entity},
};

/// Internal identity of an edge.
///
/// Display ids are a rendering convenience and may collide when two origins
/// produce the same (source, target) pair; this key cannot, because it
/// carries the index of the origin that produced the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    /// Visual source after direction resolution.
    pub source: Id,
    /// Visual target after direction resolution.
    pub target: Id,
    /// Index of the producing origin in the destination's `from` list.
    pub origin: usize,
}

/// A visual node, derived 1:1 from an [`Entity`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    /// Node id, equal to the entity name.
    pub id: Id,
    /// Display label.
    pub label: String,
    /// Category driving color and style.
    pub category: Category,
    /// Deployment marker carried through from mitigation entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implemented: Option<bool>,
    /// Top-left anchored position; zero until the orchestrator commits a
    /// layout.
    pub position: Point,
    /// Rendered size, reported asynchronously by the widget after first
    /// paint. `None` until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Explicit layout-size override. Takes precedence over the measured
    /// size when the layout engine sizes this node's vertex.
    #[serde(skip)]
    pub layout_hint: Option<Size>,
}

impl FlowNode {
    /// Creates an unmeasured node at the origin.
    pub fn new(id: Id, label: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            label: label.into(),
            category,
            implemented: None,
            position: Point::default(),
            size: None,
            layout_hint: None,
        }
    }

    /// Returns `true` once the rendering widget has reported a usable size.
    pub fn is_measured(&self) -> bool {
        self.size.is_some_and(Size::is_measured)
    }
}

impl From<&Entity> for FlowNode {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.name,
            label: entity.display_label(),
            category: entity.category,
            implemented: entity.implemented,
            position: Point::default(),
            size: None,
            layout_hint: None,
        }
    }
}

/// A visual edge, derived from one (destination, origin) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    /// Display id, `"source-target"` after direction resolution. Not
    /// guaranteed unique; see [`EdgeKey`].
    pub id: String,
    /// Visual source node id.
    pub source: Id,
    /// Visual target node id.
    pub target: Id,
    /// Optional label from a structured origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Index of the producing origin in the destination's `from` list.
    pub origin: usize,
}

impl FlowEdge {
    /// The edge's internal identity.
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source,
            target: self.target,
            origin: self.origin,
        }
    }
}

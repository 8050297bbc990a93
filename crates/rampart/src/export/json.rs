//! JSON export of a positioned diagram.

use indexmap::IndexMap;
use serde::Serialize;

use rampart_core::{
    flow::{FlowEdge, FlowNode},
    model::Category,
};

use crate::{config::StyleConfig, export::ExportError};

/// The serialized shape of one diagram: title, positioned nodes, edges, and
/// the category palette the renderer should apply.
#[derive(Debug, Serialize)]
struct DiagramDocument<'a> {
    title: &'a str,
    nodes: &'a [FlowNode],
    edges: &'a [FlowEdge],
    styles: IndexMap<&'static str, &'a str>,
}

/// Serializes a positioned diagram to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError`] when serialization fails.
pub fn diagram_to_json(
    title: &str,
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    style: &StyleConfig,
) -> Result<String, ExportError> {
    let styles: IndexMap<&'static str, &str> = Category::all()
        .into_iter()
        .map(|category| (category.as_str(), style.color_string(category)))
        .collect();

    let document = DiagramDocument {
        title,
        nodes,
        edges,
        styles,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use rampart_core::{geometry::Point, identifier::Id};

    use super::*;

    #[test]
    fn test_export_includes_nodes_edges_and_styles() {
        let mut node = FlowNode::new(Id::new("a"), "A fact", Category::Fact);
        node.position = Point::new(10.0, 20.0);
        let edge = FlowEdge {
            id: "a-b".to_string(),
            source: Id::new("a"),
            target: Id::new("b"),
            label: Some("enables".to_string()),
            origin: 0,
        };

        let json =
            diagram_to_json("Demo", &[node], &[edge], &StyleConfig::default()).unwrap();

        assert!(json.contains("\"title\": \"Demo\""));
        assert!(json.contains("\"id\": \"a\""));
        assert!(json.contains("\"label\": \"enables\""));
        assert!(json.contains("\"fact\""));
        // Unmeasured size is omitted, not null.
        assert!(!json.contains("\"size\": null"));
    }
}

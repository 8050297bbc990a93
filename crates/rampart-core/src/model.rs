//! Semantic threat-model types.
//!
//! This module contains the normalized representation of a threat-model
//! document after decoding and validation. The raw document encodes an
//! entity's name and label as a single ad hoc key/value pair; that encoding
//! is resolved at the document boundary and never re-derived here — entities
//! and origins are ordinary records with explicit `name` and `label` fields.
//!
//! # Pipeline Position
//!
//! ```text
//! YAML Source
//!     ↓ external parser (serde_yaml)
//! Value Tree
//!     ↓ decode + validate (rampart-doc)
//! Threat Model (these types)
//!     ↓ graph derivation
//! Flow Nodes / Flow Edges
//!     ↓ layout
//! Positioned Diagram
//! ```

use std::fmt;

use serde::Serialize;

use crate::identifier::Id;

/// The document section an entity was declared in.
///
/// The category drives the node's visual styling and nothing else; it never
/// changes graph topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// An environmental precondition the model takes as given.
    Fact,
    /// A hostile step the model defends against.
    Attack,
    /// A countermeasure; may carry an `implemented` marker.
    Mitigation,
    /// An attacker objective the tree converges on.
    Goal,
    /// A trust boundary crossed by the modeled system.
    Boundary,
}

impl Category {
    /// Returns the lowercase section name used in documents and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Fact => "fact",
            Category::Attack => "attack",
            Category::Mitigation => "mitigation",
            Category::Goal => "goal",
            Category::Boundary => "boundary",
        }
    }

    /// All categories in document order.
    pub fn all() -> [Category; 5] {
        [
            Category::Fact,
            Category::Attack,
            Category::Mitigation,
            Category::Goal,
            Category::Boundary,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference from a destination entity back to one of its causes.
///
/// The raw document allows two encodings: a bare name string (an undecorated
/// forward edge) and a mapping carrying an optional label and an optional
/// `backwards` flag. Both normalize to this record.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    /// Name of the referenced entity.
    pub name: Id,
    /// Optional edge label.
    pub label: Option<String>,
    /// Reverses the visual arrow direction while keeping the document's
    /// destination-owns-the-reference relationship.
    pub backwards: bool,
}

impl Origin {
    /// An undecorated origin, as written with a bare name string.
    pub fn bare(name: &str) -> Self {
        Self {
            name: Id::new(name),
            label: None,
            backwards: false,
        }
    }

    /// A structured origin with an optional label and direction flag.
    pub fn new(name: &str, label: Option<String>, backwards: bool) -> Self {
        Self {
            name: Id::new(name),
            label,
            backwards,
        }
    }
}

/// A named point in the threat model.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique name within the whole document.
    pub name: Id,
    /// Optional human-readable label; the name stands in when absent.
    pub label: Option<String>,
    /// Section the entity was declared in.
    pub category: Category,
    /// Deployment state, meaningful only for mitigations. Carried as data;
    /// the graph builder never consults it.
    pub implemented: Option<bool>,
    /// References to the entities that causally lead into this one,
    /// in document order.
    pub origins: Vec<Origin>,
}

impl Entity {
    /// Creates an entity with no origins.
    pub fn new(name: &str, label: Option<String>, category: Category) -> Self {
        Self {
            name: Id::new(name),
            label,
            category,
            implemented: None,
            origins: Vec::new(),
        }
    }

    /// The label shown on the entity's node: the explicit label when present,
    /// the name otherwise.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.name.to_string())
    }
}

/// A fully decoded and validated threat-model document.
///
/// Entity names are unique across all five collections combined; the decoder
/// enforces this before a `ThreatModel` is ever constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreatModel {
    /// Document title; empty when the author omitted it.
    pub title: String,
    /// Environmental preconditions.
    pub facts: Vec<Entity>,
    /// Hostile steps.
    pub attacks: Vec<Entity>,
    /// Countermeasures.
    pub mitigations: Vec<Entity>,
    /// Attacker objectives.
    pub goals: Vec<Entity>,
    /// Trust boundaries.
    pub boundaries: Vec<Entity>,
}

impl ThreatModel {
    /// Iterates every entity in document order: facts, attacks, mitigations,
    /// goals, boundaries, each section in declaration order.
    ///
    /// The order carries no meaning but is deterministic, so repeated graph
    /// builds from the same document are structurally identical.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.facts
            .iter()
            .chain(&self.attacks)
            .chain(&self.mitigations)
            .chain(&self.goals)
            .chain(&self.boundaries)
    }

    /// Total entity count across all sections.
    pub fn len(&self) -> usize {
        self.facts.len()
            + self.attacks.len()
            + self.mitigations.len()
            + self.goals.len()
            + self.boundaries.len()
    }

    /// Returns `true` when the document declares no entities at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_falls_back_to_name() {
        let unlabeled = Entity::new("tls", None, Category::Mitigation);
        assert_eq!(unlabeled.display_label(), "tls");

        let labeled = Entity::new(
            "tls",
            Some("TLS everywhere".to_string()),
            Category::Mitigation,
        );
        assert_eq!(labeled.display_label(), "TLS everywhere");
    }

    #[test]
    fn test_entities_iterate_in_document_order() {
        let mut model = ThreatModel {
            title: "demo".to_string(),
            ..Default::default()
        };
        model.goals.push(Entity::new("g", None, Category::Goal));
        model.facts.push(Entity::new("f", None, Category::Fact));
        model.attacks.push(Entity::new("a", None, Category::Attack));

        let names: Vec<String> = model.entities().map(|e| e.name.to_string()).collect();
        assert_eq!(names, vec!["f", "a", "g"]);
        assert_eq!(model.len(), 3);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_bare_origin_is_forward_and_unlabeled() {
        let origin = Origin::bare("weak-password");
        assert!(!origin.backwards);
        assert!(origin.label.is_none());
    }
}

//! Decoding the parsed document tree into a validated [`ThreatModel`].
//!
//! Raw YAML parsing is delegated to `serde_yaml`; this module only consumes
//! the resulting value tree. Decoding accumulates diagnostics so an author
//! sees every malformed entity in one pass, but any error-severity
//! diagnostic aborts the decode — an invalid document never yields a partial
//! model.

use std::collections::HashSet;

use log::{debug, trace, warn};
use serde_yaml::{Mapping, Value};

use rampart_core::model::{Category, Entity, Origin, ThreatModel};

use crate::{
    error::{Diagnostic, DiagnosticCollector, DocError, ErrorCode},
    schema,
};

/// Entity sections in document order, with the category each assigns.
const SECTIONS: [(&str, Category); 5] = [
    ("facts", Category::Fact),
    ("attacks", Category::Attack),
    ("mitigations", Category::Mitigation),
    ("goals", Category::Goal),
    ("boundaries", Category::Boundary),
];

/// Parses and decodes a threat-model document from YAML source.
///
/// # Errors
///
/// Returns [`DocError`] when the source is not valid YAML or when the value
/// tree violates the document schema.
pub fn decode_str(source: &str) -> Result<ThreatModel, DocError> {
    let tree: Value = serde_yaml::from_str(source).map_err(|err| {
        DocError::from(
            Diagnostic::error(format!("document is not valid YAML: {err}"))
                .with_code(ErrorCode::E000),
        )
    })?;
    decode_document(&tree)
}

/// Decodes an already-parsed value tree into a validated [`ThreatModel`].
///
/// # Errors
///
/// Returns [`DocError`] carrying every diagnostic found when the tree
/// violates the document schema; no partial model is produced.
pub fn decode_document(tree: &Value) -> Result<ThreatModel, DocError> {
    let mut collector = DiagnosticCollector::new();

    let Some(root) = tree.as_mapping() else {
        return Err(DocError::from(
            Diagnostic::error("document root must be a mapping")
                .with_code(ErrorCode::E001)
                .with_help("expected a `title` and entity sections such as `facts:` and `goals:`"),
        ));
    };

    let title = decode_title(root, &mut collector);

    let mut model = ThreatModel {
        title,
        ..Default::default()
    };

    for (section_name, category) in SECTIONS {
        let entities = match root.get(section_name) {
            None => Vec::new(),
            Some(value) => decode_section(section_name, value, category, &mut collector),
        };
        trace!(section = section_name, count = entities.len(); "Decoded section");
        match category {
            Category::Fact => model.facts = entities,
            Category::Attack => model.attacks = entities,
            Category::Mitigation => model.mitigations = entities,
            Category::Goal => model.goals = entities,
            Category::Boundary => model.boundaries = entities,
        }
    }

    report_unknown_sections(root, &mut collector);
    check_name_uniqueness(&model, &mut collector);

    collector.finish()?;

    debug!(entities = model.len(); "Document decoded successfully");
    Ok(model)
}

fn decode_title(root: &Mapping, collector: &mut DiagnosticCollector) -> String {
    match root.get("title") {
        Some(Value::String(title)) => title.clone(),
        None | Some(Value::Null) => {
            collector.emit(Diagnostic::warning("document has no title"));
            String::new()
        }
        Some(other) => {
            collector.emit(
                Diagnostic::error("`title` must be a string")
                    .with_code(ErrorCode::E002)
                    .with_fragment(other),
            );
            String::new()
        }
    }
}

fn decode_section(
    section_name: &str,
    value: &Value,
    category: Category,
    collector: &mut DiagnosticCollector,
) -> Vec<Entity> {
    let Some(items) = value.as_sequence() else {
        collector.emit(
            Diagnostic::error(format!("section `{section_name}` must be a sequence"))
                .with_code(ErrorCode::E003)
                .with_fragment(value),
        );
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| decode_entity(item, category, collector))
        .collect()
}

fn decode_entity(
    value: &Value,
    category: Category,
    collector: &mut DiagnosticCollector,
) -> Option<Entity> {
    let Some(mapping) = value.as_mapping() else {
        collector.emit(
            Diagnostic::error("an entity must be a mapping")
                .with_code(ErrorCode::E100)
                .with_fragment(value),
        );
        return None;
    };

    let (name, label) = match schema::extract_name_and_label(mapping) {
        Ok(pair) => pair,
        Err(diagnostic) => {
            collector.emit(diagnostic);
            return None;
        }
    };

    let mut entity = Entity::new(&name, label, category);

    entity.implemented = match mapping.get("implemented") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(implemented)) => Some(*implemented),
        Some(_) => {
            collector.emit(
                Diagnostic::error(format!("`implemented` on `{name}` must be a boolean"))
                    .with_code(ErrorCode::E107)
                    .with_fragment(value),
            );
            None
        }
    };

    entity.origins = match mapping.get("from") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| decode_origin(item, &name, collector))
            .collect(),
        Some(other) => {
            collector.emit(
                Diagnostic::error(format!("`from` on `{name}` must be a sequence"))
                    .with_code(ErrorCode::E104)
                    .with_fragment(other),
            );
            Vec::new()
        }
    };

    Some(entity)
}

fn decode_origin(
    value: &Value,
    destination: &str,
    collector: &mut DiagnosticCollector,
) -> Option<Origin> {
    match value {
        Value::String(name) if !name.is_empty() => Some(Origin::bare(name)),
        Value::Mapping(mapping) => {
            let (name, label) = match schema::extract_name_and_label(mapping) {
                Ok(pair) => pair,
                Err(diagnostic) => {
                    collector.emit(diagnostic);
                    return None;
                }
            };

            let backwards = match mapping.get("backwards") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(backwards)) => *backwards,
                Some(_) => {
                    collector.emit(
                        Diagnostic::error(format!(
                            "`backwards` on origin `{name}` must be a boolean"
                        ))
                        .with_code(ErrorCode::E106)
                        .with_fragment(value),
                    );
                    false
                }
            };

            Some(Origin::new(&name, label, backwards))
        }
        _ => {
            collector.emit(
                Diagnostic::error(format!(
                    "origin of `{destination}` must be a name string or a mapping"
                ))
                .with_code(ErrorCode::E105)
                .with_fragment(value),
            );
            None
        }
    }
}

fn report_unknown_sections(root: &Mapping, collector: &mut DiagnosticCollector) {
    for (key, _) in root {
        let Some(key) = key.as_str() else { continue };
        if key == "title" || SECTIONS.iter().any(|(name, _)| *name == key) {
            continue;
        }
        warn!(section = key; "Ignoring unknown top-level section");
        collector.emit(Diagnostic::warning(format!(
            "unknown section `{key}` ignored"
        )));
    }
}

fn check_name_uniqueness(model: &ThreatModel, collector: &mut DiagnosticCollector) {
    let mut seen = HashSet::new();
    for entity in model.entities() {
        if !seen.insert(entity.name) {
            collector.emit(
                Diagnostic::error(format!(
                    "entity name `{}` is declared more than once",
                    entity.name
                ))
                .with_code(ErrorCode::E200)
                .with_help("names must be unique across all sections combined"),
            );
        }
    }
}

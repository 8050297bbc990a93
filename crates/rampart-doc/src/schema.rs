//! The exactly-one-semantic-key rule.
//!
//! In the raw document an entity (or a structured origin) is a mapping whose
//! name and label travel as a single ad hoc key/value pair next to the
//! reserved keys:
//!
//! ```yaml
//! - stolen-session: Attacker replays a stolen session cookie
//!   from:
//!     - no-cookie-expiry
//! ```
//!
//! After removing the reserved keys exactly one entry must remain; its key is
//! the entity's name and its value, when non-empty, is the display label.
//! Anything else is a hard validation failure — a diagram silently missing an
//! entity would misrepresent the threat model.
//!
//! This decode step is confined to the document boundary: everything past it
//! works with explicit `name`/`label` fields.

use serde_yaml::{Mapping, Value};

use crate::error::{Diagnostic, ErrorCode};

/// Keys with fixed meaning inside an entity or origin mapping; everything
/// else is a candidate name key.
pub const RESERVED_KEYS: [&str; 3] = ["from", "backwards", "implemented"];

/// Returns `true` for keys that carry entity structure rather than identity.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Extracts the `(name, label)` pair from an entity or origin mapping.
///
/// The label is `None` when the name key's value is empty or null, in which
/// case the node displays its name.
///
/// # Errors
///
/// Returns an error [`Diagnostic`] carrying the offending mapping when:
/// - a key is not a string ([`ErrorCode::E100`])
/// - no key remains after removing the reserved set ([`ErrorCode::E101`])
/// - more than one key remains ([`ErrorCode::E102`])
/// - the name key's value is neither a string nor null ([`ErrorCode::E103`])
pub fn extract_name_and_label(mapping: &Mapping) -> Result<(String, Option<String>), Diagnostic> {
    let as_value = || Value::Mapping(mapping.clone());

    let mut semantic: Option<(&str, &Value)> = None;
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            return Err(Diagnostic::error("entity keys must be strings")
                .with_code(ErrorCode::E100)
                .with_fragment(&as_value()));
        };
        if is_reserved(key) {
            continue;
        }
        if semantic.is_some() {
            return Err(
                Diagnostic::error("entity has more than one candidate name key")
                    .with_code(ErrorCode::E102)
                    .with_fragment(&as_value())
                    .with_help(format!(
                        "keep one name key per entity; reserved keys are {}",
                        RESERVED_KEYS.map(|k| format!("`{k}`")).join(", ")
                    )),
            );
        }
        semantic = Some((key, value));
    }

    let Some((name, value)) = semantic else {
        return Err(Diagnostic::error("entity has no name key")
            .with_code(ErrorCode::E101)
            .with_fragment(&as_value()));
    };

    let label = match value {
        Value::Null => None,
        Value::String(label) if label.is_empty() => None,
        Value::String(label) => Some(label.clone()),
        _ => {
            return Err(Diagnostic::error("entity label must be a string")
                .with_code(ErrorCode::E103)
                .with_fragment(&as_value())
                .with_help(
                    "check indentation: `from` must align with the entity name, not nest under it",
                ));
        }
    };

    Ok((name.to_string(), label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    fn mapping(source: &str) -> Mapping {
        serde_yaml::from_str(source).expect("test fixture must be valid YAML")
    }

    #[test]
    fn test_name_with_label() {
        let m = mapping("phishing: Attacker phishes an operator\nfrom:\n  - weak-training");
        let (name, label) = extract_name_and_label(&m).unwrap();
        assert_eq!(name, "phishing");
        assert_eq!(label.as_deref(), Some("Attacker phishes an operator"));
    }

    #[test]
    fn test_name_without_label() {
        let m = mapping("phishing:\nfrom:\n  - weak-training");
        let (name, label) = extract_name_and_label(&m).unwrap();
        assert_eq!(name, "phishing");
        assert_eq!(label, None);
    }

    #[test]
    fn test_empty_label_is_absent() {
        let m = mapping("phishing: ''");
        let (_, label) = extract_name_and_label(&m).unwrap();
        assert_eq!(label, None);
    }

    #[test]
    fn test_reserved_keys_do_not_count_as_names() {
        let m = mapping("from:\n  - a\nbackwards: true\nimplemented: false");
        let err = extract_name_and_label(&m).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert!(err.severity().is_error());
    }

    #[test]
    fn test_two_candidate_names_rejected() {
        let m = mapping("phish: Phishing\nsmish: Smishing");
        let err = extract_name_and_label(&m).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E102));
        assert!(err.fragment().unwrap().contains("smish"));
    }

    #[test]
    fn test_nested_mapping_label_rejected() {
        // The classic indentation mistake: `from` nested under the name key.
        let m = mapping("phishing:\n  from:\n    - weak-training");
        let err = extract_name_and_label(&m).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E103));
    }
}

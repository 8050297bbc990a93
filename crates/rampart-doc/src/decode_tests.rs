//! Unit tests for document decoding and validation.
//!
//! These exercise the exactly-one-key rule, both origin encodings, the
//! reserved keys, and the all-or-nothing failure behavior of the decoder.

use rampart_core::model::Category;

use crate::{
    decode_str,
    error::{DocError, ErrorCode},
};

/// Helper asserting the decode fails and returning its diagnostics container.
fn decode_err(source: &str) -> DocError {
    match decode_str(source) {
        Ok(model) => panic!("expected decoding to fail, got model with {} entities", model.len()),
        Err(err) => err,
    }
}

/// Helper asserting some diagnostic in the error carries the given code.
fn assert_has_code(err: &DocError, code: ErrorCode) {
    assert!(
        err.diagnostics().iter().any(|d| d.code() == Some(code)),
        "expected a {code} diagnostic, got: {:?}",
        err.diagnostics()
    );
}

#[test]
fn test_decode_minimal_document() {
    let model = decode_str("title: Demo\nfacts:\n  - a: Something known\n").unwrap();

    assert_eq!(model.title, "Demo");
    assert_eq!(model.facts.len(), 1);
    assert_eq!(model.facts[0].name, "a");
    assert_eq!(model.facts[0].label.as_deref(), Some("Something known"));
    assert_eq!(model.facts[0].category, Category::Fact);
}

#[test]
fn test_all_sections_assign_categories() {
    let source = "\
title: Categories
facts:
  - f:
attacks:
  - a:
mitigations:
  - m:
goals:
  - g:
boundaries:
  - b:
";
    let model = decode_str(source).unwrap();
    let categories: Vec<Category> = model.entities().map(|e| e.category).collect();
    assert_eq!(categories, Category::all());
}

#[test]
fn test_bare_origin() {
    let source = "\
title: Origins
facts:
  - a:
attacks:
  - b:
    from:
      - a
";
    let model = decode_str(source).unwrap();
    let origin = &model.attacks[0].origins[0];
    assert_eq!(origin.name, "a");
    assert_eq!(origin.label, None);
    assert!(!origin.backwards);
}

#[test]
fn test_structured_origin_with_label_and_backwards() {
    let source = "\
title: Origins
attacks:
  - tamper:
mitigations:
  - signing:
    from:
      - tamper: blocks
        backwards: true
";
    let model = decode_str(source).unwrap();
    let origin = &model.mitigations[0].origins[0];
    assert_eq!(origin.name, "tamper");
    assert_eq!(origin.label.as_deref(), Some("blocks"));
    assert!(origin.backwards);
}

#[test]
fn test_implemented_is_carried_not_interpreted() {
    let source = "\
title: Flags
mitigations:
  - planned:
    implemented: false
  - deployed:
    implemented: true
  - unspecified:
";
    let model = decode_str(source).unwrap();
    assert_eq!(model.mitigations[0].implemented, Some(false));
    assert_eq!(model.mitigations[1].implemented, Some(true));
    assert_eq!(model.mitigations[2].implemented, None);
}

#[test]
fn test_missing_title_is_only_a_warning() {
    let model = decode_str("facts:\n  - a:\n").unwrap();
    assert_eq!(model.title, "");
    assert_eq!(model.facts.len(), 1);
}

#[test]
fn test_unknown_section_is_only_a_warning() {
    let model = decode_str("title: T\nnotes:\n  - scratch\nfacts:\n  - a:\n").unwrap();
    assert_eq!(model.len(), 1);
}

#[test]
fn test_invalid_yaml_fails_with_e000() {
    let err = decode_err("title: [unclosed\n");
    assert_has_code(&err, ErrorCode::E000);
}

#[test]
fn test_non_mapping_root_fails() {
    let err = decode_err("- just\n- a\n- list\n");
    assert_has_code(&err, ErrorCode::E001);
}

#[test]
fn test_entity_with_two_names_fails_whole_document() {
    let source = "\
title: Broken
facts:
  - fine:
attacks:
  - phish: Phishing
    smish: Smishing
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E102);
}

#[test]
fn test_entity_with_no_name_fails() {
    let source = "\
title: Broken
attacks:
  - from:
      - somewhere
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E101);
}

#[test]
fn test_all_malformed_entities_reported_in_one_pass() {
    let source = "\
title: Broken
facts:
  - from:
      - a
attacks:
  - x: X
    y: Y
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E101);
    assert_has_code(&err, ErrorCode::E102);
}

#[test]
fn test_duplicate_names_across_sections_fail() {
    let source = "\
title: Broken
facts:
  - shared:
attacks:
  - shared:
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E200);
}

#[test]
fn test_non_sequence_from_fails() {
    let source = "\
title: Broken
attacks:
  - a:
    from: not-a-list
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E104);
}

#[test]
fn test_non_boolean_backwards_fails() {
    let source = "\
title: Broken
attacks:
  - a:
mitigations:
  - m:
    from:
      - a: label
        backwards: yes please
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E106);
}

#[test]
fn test_non_boolean_implemented_fails() {
    let source = "\
title: Broken
mitigations:
  - m:
    implemented: soon
";
    let err = decode_err(source);
    assert_has_code(&err, ErrorCode::E107);
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Any well-formed single-entity document round-trips its name and
        /// label through the decoder unchanged.
        #[test]
        fn prop_name_and_label_survive_decoding(
            // Hyphenated names and spaced labels cannot collide with YAML
            // keyword scalars like `true` or `null`.
            name in "[a-z]{1,8}-[a-z0-9]{1,8}",
            label in "[A-Z][a-z]{1,12} [a-z]{1,12}",
        ) {
            let source = format!("title: P\nfacts:\n  - {name}: {label}\n");
            let model = decode_str(&source).unwrap();

            prop_assert_eq!(model.facts.len(), 1);
            prop_assert_eq!(model.facts[0].name.to_string(), name);
            prop_assert_eq!(model.facts[0].label.as_deref(), Some(label.as_str()));
        }
    }
}

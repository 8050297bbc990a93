//! Integration tests for the full derive-mount-measure-layout pipeline.
//!
//! These drive the public API end to end the way a hosting application
//! would: parse a document, derive the graph, mount it on a surface at zero
//! positions, let the surface measure, then orchestrate the layout.

use std::future::ready;
use std::time::Duration;

use futures::executor::block_on;

use rampart::{
    DiagramBuilder,
    config::AppConfig,
    layout::Outcome,
    surface::{FlowSurface, HeadlessSurface},
};

fn instant_sleep(_interval: Duration) -> std::future::Ready<()> {
    ready(())
}

const CHAIN: &str = "\
title: Credential theft
facts:
  - a: Passwords are reused
attacks:
  - b: Credential stuffing
    from:
      - a
goals:
  - g: Account takeover
    from:
      - b
";

#[test]
fn test_chain_document_end_to_end() {
    let builder = DiagramBuilder::default();
    let model = builder.parse(CHAIN).expect("document is valid");
    let graph = builder.build_graph(&model).expect("graph is consistent");

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let edges = graph.flow_edges();
    assert_eq!(edges[0].id, "a-b");
    assert_eq!(edges[1].id, "b-g");
    assert!(edges.iter().all(|e| e.label.is_none()));

    let mut surface = HeadlessSurface::new();
    builder.mount(&graph, &mut surface);
    assert!(surface.nodes().iter().all(|n| n.position.is_zero()));

    surface.measure_all();
    let mut orchestrator = builder.orchestrator();
    let outcome = block_on(orchestrator.run(&mut surface, instant_sleep)).unwrap();
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(surface.fit_view_requests(), 1);

    // The goal lies further along the primary axis than the attack, which
    // lies further than the fact.
    let nodes = surface.nodes();
    let x_of = |name: &str| {
        nodes
            .iter()
            .find(|n| n.id == name)
            .expect("node exists")
            .position
            .x()
    };
    assert!(x_of("g") > x_of("b"));
    assert!(x_of("b") > x_of("a"));
}

#[test]
fn test_layout_waits_for_measurement() {
    // Without measure_all the surface never reports sizes, so the
    // orchestrator must give up with a bounded timeout instead of laying
    // out unmeasured nodes.
    let config: AppConfig = toml_like_config();
    let builder = DiagramBuilder::new(config);
    let model = builder.parse(CHAIN).unwrap();
    let graph = builder.build_graph(&model).unwrap();

    let mut surface = HeadlessSurface::new();
    builder.mount(&graph, &mut surface);

    let mut orchestrator = builder.orchestrator();
    let result = block_on(orchestrator.run(&mut surface, instant_sleep));

    assert!(result.is_err());
    assert!(surface.nodes().iter().all(|n| n.position.is_zero()));
    assert_eq!(surface.fit_view_requests(), 0);
}

/// A config with a tight poll budget so the timeout test stays fast.
fn toml_like_config() -> AppConfig {
    serde_json::from_str(r#"{"layout": {"poll_max_wait_ms": 20}}"#).expect("valid config")
}

#[test]
fn test_mitigation_with_backwards_origin() {
    let source = "\
title: Mitigated
attacks:
  - tamper: Tamper with updates
mitigations:
  - signing: Sign all artifacts
    implemented: false
    from:
      - tamper: blocks
        backwards: true
";
    let builder = DiagramBuilder::default();
    let model = builder.parse(source).unwrap();
    let graph = builder.build_graph(&model).unwrap();

    let edges = graph.flow_edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].source, "signing");
    assert_eq!(edges[0].target, "tamper");
    assert_eq!(edges[0].id, "signing-tamper");
    assert_eq!(edges[0].label.as_deref(), Some("blocks"));

    // The implemented flag is carried as data, never topology.
    let node = graph.node("signing").unwrap();
    assert_eq!(node.implemented, Some(false));
}

#[test]
fn test_configured_root_gets_layout_hint() {
    let config: AppConfig =
        serde_json::from_str(r#"{"layout": {"root": "g"}}"#).expect("valid config");
    let builder = DiagramBuilder::new(config);
    let model = builder.parse(CHAIN).unwrap();
    let graph = builder.build_graph(&model).unwrap();

    let root = graph.node("g").unwrap();
    let hint = root.layout_hint.expect("root carries a hint");
    assert_eq!(hint.width(), 170.0);
}

#[test]
fn test_malformed_document_reaches_no_surface() {
    let source = "\
title: Broken
attacks:
  - phish: Phishing
    smish: Smishing
";
    let builder = DiagramBuilder::default();
    let err = builder.parse(source).unwrap_err();
    assert!(matches!(err, rampart::RampartError::Document { .. }));
}

#[test]
fn test_dangling_reference_aborts_graph() {
    let source = "\
title: Broken
attacks:
  - b:
    from:
      - ghost
";
    let builder = DiagramBuilder::default();
    let model = builder.parse(source).unwrap();
    let err = builder.build_graph(&model).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

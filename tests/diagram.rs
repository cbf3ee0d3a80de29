//! Tests for flowchart building and text rendering.
mod common;
use dripflow::diagram::{DiagramBuilder, EdgeLabel, NodeShape};
use dripflow::prelude::*;

#[test]
fn test_two_step_flow_renders_expected_text() {
    let text = to_diagram_text(&common::two_step_flow());
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "graph TD",
            "classDef label font-family:sans-serif,font-size:0.85em;",
            "Start>\"Start\"]",
            "Goodbye[\"Goodbye\"]",
            "Start-->|Wait 1 day|Goodbye",
        ]
    );
}

#[test]
fn test_shapes_follow_step_kind() {
    assert_eq!(NodeShape::for_kind(StepKind::SendEmail), NodeShape::Rectangle);
    assert_eq!(NodeShape::for_kind(StepKind::Unsubscribe), NodeShape::Rectangle);
    assert_eq!(NodeShape::for_kind(StepKind::Choice), NodeShape::Diamond);
    assert_eq!(NodeShape::for_kind(StepKind::Wait), NodeShape::Flag);
}

#[test]
fn test_node_order_follows_insertion_then_edges() {
    let flow: Autoresponder =
        serde_json::from_str(common::WELCOME_SERIES_JSON).expect("fixture must parse");
    let builder = DiagramBuilder::from_autoresponder(&flow);

    let ids: Vec<_> = builder.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["Start", "Checkvip", "Vipoffer", "Goodbye"]);

    let labels: Vec<_> = builder.nodes().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["Start", "Check vip", "Vip offer", "Goodbye"]);
}

#[test]
fn test_edge_order_and_labels() {
    let flow: Autoresponder =
        serde_json::from_str(common::WELCOME_SERIES_JSON).expect("fixture must parse");
    let builder = DiagramBuilder::from_autoresponder(&flow);

    let edges: Vec<_> = builder
        .edges()
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.label.clone()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("Start", "Checkvip", EdgeLabel::Delay(172_800_000)),
            ("Checkvip", "Vipoffer", EdgeLabel::Branch(Outcome::Yes)),
            ("Checkvip", "Goodbye", EdgeLabel::Branch(Outcome::No)),
        ]
    );

    let text = builder.render();
    assert!(text.contains("Start-->|Wait 2 days|Checkvip"));
    assert!(text.contains("Checkvip-->|yes|Vipoffer"));
    assert!(text.contains("Checkvip-->|no|Goodbye"));
}

#[test]
fn test_choice_renders_as_diamond() {
    let flow: Autoresponder =
        serde_json::from_str(common::WELCOME_SERIES_JSON).expect("fixture must parse");
    let text = to_diagram_text(&flow);
    assert!(text.contains("Checkvip{\"Check vip\"}"));
    assert!(text.contains("Start[\"Start\"]"));
}

#[test]
fn test_half_wired_next_action_draws_no_edge() {
    // A next action without a delay has no label and is skipped.
    let flow: Autoresponder = serde_json::from_str(
        r#"{
            "autoresponderId": "partial",
            "steps": {
                "Start": { "type": "send email", "templateId": "T", "nextAction": "Next" },
                "Next": { "type": "unsubscribe" }
            }
        }"#,
    )
    .expect("fixture must parse");
    let builder = DiagramBuilder::from_autoresponder(&flow);
    assert!(builder.edges().is_empty());
    // Both nodes still render.
    assert_eq!(builder.nodes().len(), 2);
}

#[test]
fn test_labels_with_quotes_are_escaped() {
    let mut session = EditorSession::new("quoted");
    session
        .wire_next("Start", "Say \"hi\"", HumanTime::new(1, TimeUnit::Hours))
        .expect("wiring succeeds");
    let text = to_diagram_text(session.autoresponder());
    assert!(text.contains("Say#quot;hi#quot;"));
}

#[test]
fn test_delay_labels_pluralize() {
    let mut session = EditorSession::new("delays");
    session
        .wire_next("Start", "Soon", HumanTime::new(90, TimeUnit::Minutes))
        .expect("wiring succeeds");
    let text = to_diagram_text(session.autoresponder());
    assert!(text.contains("|Wait 90 minutes|"));

    let mut session = EditorSession::new("delays");
    session
        .wire_next("Start", "Soon", HumanTime::new(1, TimeUnit::Minutes))
        .expect("wiring succeeds");
    let text = to_diagram_text(session.autoresponder());
    assert!(text.contains("|Wait 1 minute|"));
}

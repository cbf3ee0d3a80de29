//! Integration tests for dripflow
//!
//! End-to-end tests that verify the model, editor and renderer work
//! together the way an editing session uses them.
mod common;
use dripflow::prelude::*;

#[test]
fn test_json_round_trip_preserves_structure() {
    let flow: Autoresponder =
        serde_json::from_str(common::WELCOME_SERIES_JSON).expect("fixture must parse");
    let json = serde_json::to_string(&flow).expect("serialization succeeds");
    let reparsed: Autoresponder = serde_json::from_str(&json).expect("round trip parses");
    assert_eq!(flow, reparsed);

    // Step order survives the round trip.
    let names: Vec<_> = reparsed.steps.keys().cloned().collect();
    assert_eq!(names, vec!["Start", "Check vip", "Vip offer", "Goodbye"]);
}

#[test]
fn test_step_serialization_omits_unset_fields() {
    let flow = common::two_step_flow();
    let value = serde_json::to_value(&flow).expect("serialization succeeds");
    let goodbye = &value["steps"]["Goodbye"];
    assert_eq!(goodbye["type"], "unsubscribe");
    assert_eq!(goodbye["tagReason"], "list-default");
    assert!(goodbye.get("nextAction").is_none());
    assert!(goodbye.get("templateId").is_none());
}

#[test]
fn test_full_editing_session() {
    let mut session = EditorSession::new("welcome-series");

    // Start sends the welcome email...
    session.open_step(START_STEP).expect("Start exists");
    session.set_template_id("Welcome").expect("Start sends email");
    session.set_tag_on_open("opened-welcome").expect("email field");

    // ...then a day later a tag check decides the follow-up.
    session
        .wire_next(START_STEP, "Check vip", HumanTime::new(1, TimeUnit::Days))
        .expect("wiring succeeds");
    session
        .set_step_kind("Check vip", StepKind::Choice)
        .expect("unwired step can change kind");
    session.open_step("Check vip").expect("step exists");
    session.set_tag_to_check("vip").expect("choice field");
    session
        .wire_branch("Check vip", Outcome::Yes, "Vip offer")
        .expect("yes branch free");
    session.set_template_id("VipOffer").expect("new email step open");
    session
        .wire_branch("Check vip", Outcome::No, "Goodbye")
        .expect("no branch free");
    session
        .set_step_kind("Goodbye", StepKind::Unsubscribe)
        .expect("unwired step can change kind");

    let mut flow = session.into_autoresponder();
    flow.apply_default_tag_reason();
    assert_eq!(flow.validate(), Ok(()));
    assert_eq!(flow.steps.len(), 4);

    // The definition survives a save/load round trip.
    let json = serde_json::to_string(&flow).expect("serialization succeeds");
    let reloaded: Autoresponder = serde_json::from_str(&json).expect("round trip parses");
    assert_eq!(flow, reloaded);

    // And renders one node per step plus three edges.
    let text = to_diagram_text(&reloaded);
    assert!(text.contains("Start[\"Start\"]"));
    assert!(text.contains("Checkvip{\"Check vip\"}"));
    assert!(text.contains("Start-->|Wait 1 day|Checkvip"));
    assert!(text.contains("Checkvip-->|yes|Vipoffer"));
    assert!(text.contains("Checkvip-->|no|Goodbye"));
}

#[test]
fn test_load_applies_default_tag_reason() {
    let flow: Autoresponder = serde_json::from_str(
        r#"{
            "autoresponderId": "welcome",
            "defaultTagReason": "welcome-series",
            "steps": {
                "Start": { "type": "send email", "templateId": "Welcome", "tagReason": "  " }
            }
        }"#,
    )
    .expect("fixture must parse");
    let session = EditorSession::load(flow);
    assert_eq!(
        session.autoresponder().step("Start").unwrap().tag_reason(),
        Some("welcome-series")
    );
}

#[test]
fn test_api_json_of_edited_flow() {
    let mut session = EditorSession::new("drip1");
    session
        .wire_next(START_STEP, "Next", HumanTime::new(3, TimeUnit::Days))
        .expect("wiring succeeds");
    let value = session
        .autoresponder()
        .to_api_json()
        .expect("serialization succeeds");

    // Start's template id was never filled in and becomes null.
    assert!(value["steps"]["Start"]["templateId"].is_null());
    assert_eq!(value["steps"]["Start"]["nextAction"], "Next");
    assert_eq!(value["steps"]["Start"]["runNextIn"], 259_200_000);
    assert_eq!(value["steps"]["Next"]["type"], "send email");
}

#[test]
fn test_delete_then_rewire_keeps_graph_consistent() {
    let flow: Autoresponder =
        serde_json::from_str(common::WELCOME_SERIES_JSON).expect("fixture must parse");
    let mut session = EditorSession::load(flow);

    session.delete_step("Vip offer").expect("leaf deletes");
    let check = session.autoresponder().step("Check vip").expect("exists");
    assert_eq!(check.branch(Outcome::Yes), None);
    assert_eq!(check.branch(Outcome::No), Some("Goodbye"));

    // The freed branch can be wired again, to an existing step this time.
    session
        .wire_branch("Check vip", Outcome::Yes, "Goodbye")
        .expect("branch free again");
    let check = session.autoresponder().step("Check vip").expect("exists");
    assert_eq!(check.branch(Outcome::Yes), Some("Goodbye"));

    // Every edge still points at an existing step.
    let flow = session.autoresponder();
    for step in flow.steps.values() {
        for successor in step.successors() {
            assert!(flow.step(successor).is_some());
        }
    }
}

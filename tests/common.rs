//! Common test utilities for building autoresponder definitions.
use dripflow::prelude::*;

/// A two-step flow: `Start` (wait) hands over to `Goodbye` (unsubscribe)
/// after one day.
#[allow(dead_code)]
pub fn two_step_flow() -> Autoresponder {
    serde_json::from_str(TWO_STEP_JSON).expect("fixture JSON must parse")
}

/// A session holding a choice step `Check` with `tagToCheck = "vip"` and
/// no branches wired yet, reachable from `Start` after one hour.
#[allow(dead_code)]
pub fn session_with_choice() -> EditorSession {
    let mut session = EditorSession::new("vip-funnel");
    session
        .wire_next("Start", "Check", HumanTime::new(1, TimeUnit::Hours))
        .expect("wiring Start must succeed");
    session
        .set_step_kind("Check", StepKind::Choice)
        .expect("Check has no successors yet");
    session.open_step("Check").expect("Check exists");
    session.set_tag_to_check("vip").expect("Check is a choice");
    session
}

#[allow(dead_code)]
pub const TWO_STEP_JSON: &str = r#"{
    "autoresponderId": "farewell",
    "defaultTagReason": "list-default",
    "steps": {
        "Start": {
            "type": "wait",
            "tagReason": "list-default",
            "runNextIn": 86400000,
            "nextAction": "Goodbye"
        },
        "Goodbye": {
            "type": "unsubscribe",
            "tagReason": "list-default"
        }
    }
}"#;

#[allow(dead_code)]
pub const WELCOME_SERIES_JSON: &str = r#"{
    "autoresponderId": "welcome",
    "defaultTagReason": "welcome-series",
    "steps": {
        "Start": {
            "type": "send email",
            "templateId": "Welcome",
            "tagOnOpen": "opened-welcome",
            "nextAction": "Check vip",
            "runNextIn": 172800000
        },
        "Check vip": {
            "type": "make choice based on tag",
            "tagToCheck": "vip",
            "yesAction": "Vip offer",
            "noAction": "Goodbye"
        },
        "Vip offer": {
            "type": "send email",
            "templateId": "VipOffer"
        },
        "Goodbye": {
            "type": "unsubscribe"
        }
    }
}"#;

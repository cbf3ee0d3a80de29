use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One node in an autoresponder flow, discriminated by the wire-level
/// `type` field.
///
/// Optional fields are omitted from the serialized form when unset, so a
/// step round-trips to the same JSON the backend stores. Successor fields
/// (`nextAction`, `yesAction`, `noAction`) name other steps in the same
/// autoresponder by their key in the step map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    #[serde(rename = "send email", rename_all = "camelCase")]
    SendEmail {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_on_open: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_on_click: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        run_next_in: Option<u64>,
    },

    #[serde(rename = "wait", rename_all = "camelCase")]
    Wait {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        run_next_in: Option<u64>,
    },

    #[serde(rename = "make choice based on tag", rename_all = "camelCase")]
    Choice {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_to_check: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        yes_action: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_action: Option<String>,
    },

    #[serde(rename = "unsubscribe", rename_all = "camelCase")]
    Unsubscribe {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag_reason: Option<String>,
    },
}

impl Step {
    /// Creates an empty step of the given kind.
    pub fn new(kind: StepKind) -> Self {
        match kind {
            StepKind::SendEmail => Step::SendEmail {
                template_id: None,
                tag_reason: None,
                tag_on_open: None,
                tag_on_click: None,
                next_action: None,
                run_next_in: None,
            },
            StepKind::Wait => Step::Wait {
                tag_reason: None,
                next_action: None,
                run_next_in: None,
            },
            StepKind::Choice => Step::Choice {
                tag_reason: None,
                tag_to_check: None,
                yes_action: None,
                no_action: None,
            },
            StepKind::Unsubscribe => Step::Unsubscribe { tag_reason: None },
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::SendEmail { .. } => StepKind::SendEmail,
            Step::Wait { .. } => StepKind::Wait,
            Step::Choice { .. } => StepKind::Choice,
            Step::Unsubscribe { .. } => StepKind::Unsubscribe,
        }
    }

    pub fn tag_reason(&self) -> Option<&str> {
        match self {
            Step::SendEmail { tag_reason, .. }
            | Step::Wait { tag_reason, .. }
            | Step::Choice { tag_reason, .. }
            | Step::Unsubscribe { tag_reason } => tag_reason.as_deref(),
        }
    }

    pub(crate) fn set_tag_reason(&mut self, reason: Option<String>) {
        match self {
            Step::SendEmail { tag_reason, .. }
            | Step::Wait { tag_reason, .. }
            | Step::Choice { tag_reason, .. }
            | Step::Unsubscribe { tag_reason } => *tag_reason = reason,
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            Step::SendEmail { template_id, .. } => template_id.as_deref(),
            _ => None,
        }
    }

    /// Sequential successor, for `send email` and `wait` steps.
    pub fn next_action(&self) -> Option<&str> {
        match self {
            Step::SendEmail { next_action, .. } | Step::Wait { next_action, .. } => {
                next_action.as_deref()
            }
            _ => None,
        }
    }

    /// Delay in milliseconds before the sequential successor runs.
    pub fn run_next_in(&self) -> Option<u64> {
        match self {
            Step::SendEmail { run_next_in, .. } | Step::Wait { run_next_in, .. } => *run_next_in,
            _ => None,
        }
    }

    /// Branch successor of a choice step for the given tag-check outcome.
    pub fn branch(&self, outcome: Outcome) -> Option<&str> {
        match (self, outcome) {
            (Step::Choice { yes_action, .. }, Outcome::Yes) => yes_action.as_deref(),
            (Step::Choice { no_action, .. }, Outcome::No) => no_action.as_deref(),
            _ => None,
        }
    }

    /// Names of all steps this step transitions to, in the fixed order
    /// next, yes, no.
    pub fn successors(&self) -> impl Iterator<Item = &str> {
        let (next, yes, no) = match self {
            Step::SendEmail { next_action, .. } | Step::Wait { next_action, .. } => {
                (next_action.as_deref(), None, None)
            }
            Step::Choice {
                yes_action,
                no_action,
                ..
            } => (None, yes_action.as_deref(), no_action.as_deref()),
            Step::Unsubscribe { .. } => (None, None, None),
        };
        [next, yes, no].into_iter().flatten()
    }

    pub fn has_successors(&self) -> bool {
        self.successors().next().is_some()
    }

    /// Rewrites every outgoing reference to `old` so it points at `new`.
    pub(crate) fn retarget(&mut self, old: &str, new: &str) {
        let rewrite = |slot: &mut Option<String>| {
            if slot.as_deref() == Some(old) {
                *slot = Some(new.to_string());
            }
        };
        match self {
            Step::SendEmail { next_action, .. } | Step::Wait { next_action, .. } => {
                rewrite(next_action)
            }
            Step::Choice {
                yes_action,
                no_action,
                ..
            } => {
                rewrite(yes_action);
                rewrite(no_action);
            }
            Step::Unsubscribe { .. } => {}
        }
    }

    /// Clears every outgoing reference to `target`. Severing a sequential
    /// edge also drops its paired delay.
    pub(crate) fn sever(&mut self, target: &str) {
        match self {
            Step::SendEmail {
                next_action,
                run_next_in,
                ..
            }
            | Step::Wait {
                next_action,
                run_next_in,
                ..
            } => {
                if next_action.as_deref() == Some(target) {
                    *next_action = None;
                    *run_next_in = None;
                }
            }
            Step::Choice {
                yes_action,
                no_action,
                ..
            } => {
                if yes_action.as_deref() == Some(target) {
                    *yes_action = None;
                }
                if no_action.as_deref() == Some(target) {
                    *no_action = None;
                }
            }
            Step::Unsubscribe { .. } => {}
        }
    }

    /// Converts this step to another kind, keeping the tag reason. Only
    /// meaningful for steps without successors; fields the new kind does
    /// not carry are dropped, which is how leaving `send email` loses its
    /// template id.
    pub(crate) fn converted_to(&self, kind: StepKind) -> Self {
        let mut step = Step::new(kind);
        step.set_tag_reason(self.tag_reason().map(str::to_string));
        if let (
            Step::SendEmail { template_id, .. },
            Step::SendEmail {
                template_id: old, ..
            },
        ) = (&mut step, self)
        {
            *template_id = old.clone();
        }
        step
    }
}

/// The discriminant of [`Step`], using the same wire strings as the
/// serialized `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    SendEmail,
    Wait,
    Choice,
    Unsubscribe,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::SendEmail,
        StepKind::Choice,
        StepKind::Unsubscribe,
        StepKind::Wait,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::SendEmail => "send email",
            StepKind::Wait => "wait",
            StepKind::Choice => "make choice based on tag",
            StepKind::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send email" => Ok(StepKind::SendEmail),
            "wait" => Ok(StepKind::Wait),
            "make choice based on tag" => Ok(StepKind::Choice),
            "unsubscribe" => Ok(StepKind::Unsubscribe),
            other => Err(format!("Unrecognised step type '{}'", other)),
        }
    }
}

/// Result of a tag check, naming the branch it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Yes,
    No,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Yes => write!(f, "yes"),
            Outcome::No => write!(f, "no"),
        }
    }
}

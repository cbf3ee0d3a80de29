use crate::error::ValidationError;
use crate::flow::step::{Step, StepKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the distinguished entry step. It always exists and can be
/// neither renamed nor deleted.
pub const START_STEP: &str = "Start";

/// Tag reason applied when neither a step nor the autoresponder names one.
pub const DEFAULT_TAG_REASON: &str = "list-default";

/// A persisted flow of timed and conditional email steps.
///
/// The step map is keyed by step name and keeps insertion order, which is
/// also the order diagram rendering walks the graph in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autoresponder {
    pub autoresponder_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tag_reason: Option<String>,
    pub steps: IndexMap<String, Step>,
}

impl Autoresponder {
    /// Creates the pristine single-step flow a new editor session starts
    /// from: a `Start` step of kind `send email` with an empty template id.
    pub fn new(autoresponder_id: impl Into<String>) -> Self {
        let mut steps = IndexMap::new();
        let mut start = Step::new(StepKind::SendEmail);
        if let Step::SendEmail { template_id, .. } = &mut start {
            *template_id = Some(String::new());
        }
        steps.insert(START_STEP.to_string(), start);
        Self {
            autoresponder_id: autoresponder_id.into(),
            default_tag_reason: Some(DEFAULT_TAG_REASON.to_string()),
            steps,
        }
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }

    pub fn step_mut(&mut self, name: &str) -> Option<&mut Step> {
        self.steps.get_mut(name)
    }

    /// True while the flow is still the untouched `Start`-only definition.
    pub fn is_pristine(&self) -> bool {
        self.steps.len() == 1
            && self
                .step(START_STEP)
                .is_some_and(|step| step.template_id() == Some(""))
    }

    /// Copies the default tag reason into every step whose own tag reason
    /// is missing or blank. Run before saving.
    pub fn apply_default_tag_reason(&mut self) {
        let Some(default) = self.default_tag_reason.clone() else {
            return;
        };
        if default.is_empty() {
            return;
        }
        for step in self.steps.values_mut() {
            let blank = step
                .tag_reason()
                .map_or(true, |reason| reason.trim().is_empty());
            if blank {
                step.set_tag_reason(Some(default.clone()));
            }
        }
    }

    /// Checks the flow is complete enough to save: it has an id and every
    /// `send email` step names a template.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.autoresponder_id.is_empty() {
            return Err(ValidationError::MissingAutoresponderId);
        }
        for (name, step) in &self.steps {
            if step.kind() == StepKind::SendEmail
                && step.template_id().map_or(true, str::is_empty)
            {
                return Err(ValidationError::MissingTemplateId { step: name.clone() });
            }
        }
        Ok(())
    }

    /// Serializes for the create-or-update call, normalizing empty strings
    /// to null the way the backend expects.
    pub fn to_api_json(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        blank_to_null(&mut value);
        Ok(value)
    }
}

/// Recursively replaces empty strings with null.
fn blank_to_null(value: &mut Value) {
    match value {
        Value::String(s) if s.is_empty() => *value = Value::Null,
        Value::Object(map) => map.values_mut().for_each(blank_to_null),
        Value::Array(items) => items.iter_mut().for_each(blank_to_null),
        _ => {}
    }
}

/// Strips everything but ASCII alphanumerics from an autoresponder id.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Strips characters step field values may not contain and caps the
/// length at 246, matching the limits the backend imposes.
pub fn sanitize_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(246)
        .collect()
}

use crate::error::{EditError, TimeError};
use crate::flow::definition::{sanitize_field, sanitize_id, Autoresponder, START_STEP};
use crate::flow::step::{Outcome, Step, StepKind};
use crate::flow::time::HumanTime;

/// An editing session over one autoresponder.
///
/// The session owns the definition being edited plus a pointer to the step
/// currently open in the step editor. Every mutating operation validates
/// its inputs first and leaves the definition untouched on error, so the
/// invariants of [`Autoresponder`] hold between any two calls:
///
/// - step names are unique and `Start` always exists under that name,
/// - every `nextAction`/`yesAction`/`noAction` names an existing step,
/// - a step's kind is frozen once it has an outgoing transition.
#[derive(Debug, Clone)]
pub struct EditorSession {
    autoresponder: Autoresponder,
    current_step: Option<String>,
}

impl EditorSession {
    /// Starts a fresh session on a new single-`Start` autoresponder.
    pub fn new(autoresponder_id: impl Into<String>) -> Self {
        Self {
            autoresponder: Autoresponder::new(autoresponder_id),
            current_step: None,
        }
    }

    /// Starts a session on an autoresponder loaded from the backend,
    /// filling blank per-step tag reasons from the default.
    pub fn load(mut autoresponder: Autoresponder) -> Self {
        autoresponder.apply_default_tag_reason();
        Self {
            autoresponder,
            current_step: None,
        }
    }

    pub fn autoresponder(&self) -> &Autoresponder {
        &self.autoresponder
    }

    pub fn into_autoresponder(self) -> Autoresponder {
        self.autoresponder
    }

    /// Name of the step currently open in the step editor, if any.
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    /// Discards all edits and returns to a pristine, unnamed definition.
    pub fn reset(&mut self) {
        self.autoresponder = Autoresponder::new("");
        self.current_step = None;
    }

    pub fn open_step(&mut self, name: &str) -> Result<(), EditError> {
        if !self.autoresponder.steps.contains_key(name) {
            return Err(EditError::StepNotFound(name.to_string()));
        }
        self.current_step = Some(name.to_string());
        Ok(())
    }

    pub fn close_step(&mut self) {
        self.current_step = None;
    }

    /// Replaces the autoresponder id, keeping only the characters an id
    /// may contain.
    pub fn set_autoresponder_id(&mut self, raw: &str) {
        self.autoresponder.autoresponder_id = sanitize_id(raw);
    }

    /// Updates the default tag reason. On a pristine definition the
    /// `Start` step's own tag reason follows along.
    pub fn set_default_tag_reason(&mut self, reason: &str) {
        if self.autoresponder.is_pristine() {
            if let Some(start) = self.autoresponder.step_mut(START_STEP) {
                start.set_tag_reason(Some(reason.to_string()));
            }
        }
        self.autoresponder.default_tag_reason = Some(reason.to_string());
    }

    /// Renames a step, rewriting every inbound reference from other steps.
    /// The renamed entry moves to the end of the step map. `Start` cannot
    /// be renamed and the new name must not collide with an existing step.
    pub fn rename_step(&mut self, old: &str, new: &str) -> Result<(), EditError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(EditError::EmptyStepName);
        }
        if old == START_STEP {
            return Err(EditError::RenameStart(old.to_string()));
        }
        if new == old {
            return Ok(());
        }
        if self.autoresponder.steps.contains_key(new) {
            return Err(EditError::DuplicateStepName(new.to_string()));
        }
        let step = self
            .autoresponder
            .steps
            .shift_remove(old)
            .ok_or_else(|| EditError::StepNotFound(old.to_string()))?;
        for other in self.autoresponder.steps.values_mut() {
            other.retarget(old, new);
        }
        self.autoresponder.steps.insert(new.to_string(), step);
        if self.current_step.as_deref() == Some(old) {
            self.current_step = Some(new.to_string());
        }
        Ok(())
    }

    /// Changes a step's kind. Only possible while the step has no outgoing
    /// transition; leaving `send email` drops the template id.
    pub fn set_step_kind(&mut self, name: &str, kind: StepKind) -> Result<(), EditError> {
        let step = self
            .autoresponder
            .step(name)
            .ok_or_else(|| EditError::StepNotFound(name.to_string()))?;
        if step.kind() == kind {
            return Ok(());
        }
        if step.has_successors() {
            return Err(EditError::StepHasSuccessors {
                step: name.to_string(),
            });
        }
        let converted = step.converted_to(kind);
        if let Some(slot) = self.autoresponder.step_mut(name) {
            *slot = converted;
        }
        Ok(())
    }

    /// Wires the sequential successor of a `send email` or `wait` step,
    /// creating the target step if it does not exist yet. The new step is
    /// opened in the editor, as creating one through the UI would.
    pub fn wire_next(&mut self, from: &str, to: &str, delay: HumanTime) -> Result<(), EditError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(EditError::EmptyStepName);
        }
        if delay.value < 1 {
            return Err(TimeError::NonPositive(delay.value as i64).into());
        }
        let step = self
            .autoresponder
            .step(from)
            .ok_or_else(|| EditError::StepNotFound(from.to_string()))?;
        let from_kind = step.kind();
        if !matches!(from_kind, StepKind::SendEmail | StepKind::Wait) {
            return Err(EditError::NotSequential {
                step: from.to_string(),
                kind: from_kind,
            });
        }
        if step.next_action().is_some() {
            return Err(EditError::StepHasSuccessors {
                step: from.to_string(),
            });
        }
        // A wait step may only hand over to a tag choice.
        let default_kind = if from_kind == StepKind::Wait {
            StepKind::Choice
        } else {
            StepKind::SendEmail
        };
        self.ensure_step(to, default_kind)?;
        match self.autoresponder.step_mut(from) {
            Some(Step::SendEmail {
                next_action,
                run_next_in,
                ..
            })
            | Some(Step::Wait {
                next_action,
                run_next_in,
                ..
            }) => {
                *next_action = Some(to.to_string());
                *run_next_in = Some(delay.to_millis());
            }
            _ => unreachable!("kind checked above"),
        }
        self.current_step = Some(to.to_string());
        Ok(())
    }

    /// Wires one branch of a choice step, creating the target step if it
    /// does not exist yet. A branch that is already set stays as it is.
    pub fn wire_branch(&mut self, from: &str, outcome: Outcome, to: &str) -> Result<(), EditError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(EditError::EmptyStepName);
        }
        let step = self
            .autoresponder
            .step(from)
            .ok_or_else(|| EditError::StepNotFound(from.to_string()))?;
        if step.kind() != StepKind::Choice {
            return Err(EditError::NotAChoice {
                step: from.to_string(),
                kind: step.kind(),
            });
        }
        if step.branch(outcome).is_some() {
            return Err(EditError::BranchAlreadySet {
                step: from.to_string(),
                outcome,
            });
        }
        self.ensure_step(to, StepKind::SendEmail)?;
        if let Some(Step::Choice {
            yes_action,
            no_action,
            ..
        }) = self.autoresponder.step_mut(from)
        {
            match outcome {
                Outcome::Yes => *yes_action = Some(to.to_string()),
                Outcome::No => *no_action = Some(to.to_string()),
            }
        }
        self.current_step = Some(to.to_string());
        Ok(())
    }

    /// Deletes a step that has no outgoing transitions, severing every
    /// inbound edge (and its paired delay) from the rest of the graph.
    pub fn delete_step(&mut self, name: &str) -> Result<(), EditError> {
        if name == START_STEP {
            return Err(EditError::DeleteStart(name.to_string()));
        }
        let step = self
            .autoresponder
            .step(name)
            .ok_or_else(|| EditError::StepNotFound(name.to_string()))?;
        if step.has_successors() {
            return Err(EditError::StepHasSuccessors {
                step: name.to_string(),
            });
        }
        self.autoresponder.steps.shift_remove(name);
        for other in self.autoresponder.steps.values_mut() {
            other.sever(name);
        }
        if self.current_step.as_deref() == Some(name) {
            self.current_step = None;
        }
        Ok(())
    }

    /// Inserts a step under `name` if none exists, giving it the default
    /// tag reason. Returns whether a step was created.
    pub fn ensure_step(&mut self, name: &str, kind: StepKind) -> Result<bool, EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyStepName);
        }
        if self.autoresponder.steps.contains_key(name) {
            return Ok(false);
        }
        let mut step = Step::new(kind);
        step.set_tag_reason(self.autoresponder.default_tag_reason.clone());
        self.autoresponder.steps.insert(name.to_string(), step);
        Ok(true)
    }

    // Field editors for the currently open step. Values go through the
    // same character and length limits the backend imposes.

    pub fn set_template_id(&mut self, value: &str) -> Result<(), EditError> {
        let (name, step) = self.open_step_mut()?;
        match step {
            Step::SendEmail { template_id, .. } => {
                *template_id = Some(sanitize_field(value));
                Ok(())
            }
            other => Err(EditError::FieldNotSupported {
                step: name,
                kind: other.kind(),
                field: "templateId",
            }),
        }
    }

    pub fn set_tag_reason(&mut self, value: &str) -> Result<(), EditError> {
        let (_, step) = self.open_step_mut()?;
        step.set_tag_reason(Some(sanitize_field(value)));
        Ok(())
    }

    pub fn set_tag_on_open(&mut self, value: &str) -> Result<(), EditError> {
        let (name, step) = self.open_step_mut()?;
        match step {
            Step::SendEmail { tag_on_open, .. } => {
                *tag_on_open = Some(sanitize_field(value));
                Ok(())
            }
            other => Err(EditError::FieldNotSupported {
                step: name,
                kind: other.kind(),
                field: "tagOnOpen",
            }),
        }
    }

    pub fn set_tag_on_click(&mut self, value: &str) -> Result<(), EditError> {
        let (name, step) = self.open_step_mut()?;
        match step {
            Step::SendEmail { tag_on_click, .. } => {
                *tag_on_click = Some(sanitize_field(value));
                Ok(())
            }
            other => Err(EditError::FieldNotSupported {
                step: name,
                kind: other.kind(),
                field: "tagOnClick",
            }),
        }
    }

    pub fn set_tag_to_check(&mut self, value: &str) -> Result<(), EditError> {
        let (name, step) = self.open_step_mut()?;
        match step {
            Step::Choice { tag_to_check, .. } => {
                *tag_to_check = Some(sanitize_field(value));
                Ok(())
            }
            other => Err(EditError::FieldNotSupported {
                step: name,
                kind: other.kind(),
                field: "tagToCheck",
            }),
        }
    }

    /// Changes the delay before the open step's existing next action runs.
    pub fn set_delay(&mut self, delay: HumanTime) -> Result<(), EditError> {
        if delay.value < 1 {
            return Err(TimeError::NonPositive(delay.value as i64).into());
        }
        let (name, step) = self.open_step_mut()?;
        match step {
            Step::SendEmail {
                next_action: Some(_),
                run_next_in,
                ..
            }
            | Step::Wait {
                next_action: Some(_),
                run_next_in,
                ..
            } => {
                *run_next_in = Some(delay.to_millis());
                Ok(())
            }
            Step::SendEmail { .. } | Step::Wait { .. } => {
                Err(EditError::NotWired { step: name })
            }
            other => Err(EditError::NotSequential {
                step: name,
                kind: other.kind(),
            }),
        }
    }

    fn open_step_mut(&mut self) -> Result<(String, &mut Step), EditError> {
        let name = self.current_step.clone().ok_or(EditError::NoOpenStep)?;
        let step = self
            .autoresponder
            .steps
            .get_mut(&name)
            .ok_or_else(|| EditError::StepNotFound(name.clone()))?;
        Ok((name, step))
    }
}

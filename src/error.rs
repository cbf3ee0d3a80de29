use crate::flow::{Outcome, StepKind};
use thiserror::Error;

/// Errors that can occur while parsing or converting step delays.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid time value: '{0}' is not an integer")]
    InvalidValue(String),

    #[error("Invalid time unit: '{0}'")]
    InvalidUnit(String),

    #[error("Step delays must be positive, got {0}")]
    NonPositive(i64),
}

/// Errors raised by editor operations. No operation that returns an error
/// mutates the underlying autoresponder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid step name: step names must not be empty")]
    EmptyStepName,

    #[error("Step '{0}' does not exist")]
    StepNotFound(String),

    #[error("A step named '{0}' already exists")]
    DuplicateStepName(String),

    #[error("The '{0}' step cannot be renamed")]
    RenameStart(String),

    #[error("The '{0}' step cannot be deleted")]
    DeleteStart(String),

    #[error("Step '{step}' already has outgoing transitions and is frozen")]
    StepHasSuccessors { step: String },

    #[error("Step '{step}' already has a '{outcome}' branch")]
    BranchAlreadySet { step: String, outcome: Outcome },

    #[error("Step '{step}' is a '{kind}' step and cannot take a next action")]
    NotSequential { step: String, kind: StepKind },

    #[error("Step '{step}' is a '{kind}' step, not a tag choice")]
    NotAChoice { step: String, kind: StepKind },

    #[error("Step '{step}' is a '{kind}' step and has no '{field}' field")]
    FieldNotSupported {
        step: String,
        kind: StepKind,
        field: &'static str,
    },

    #[error("Step '{step}' has no next action whose delay could change")]
    NotWired { step: String },

    #[error("No step is currently open in the editor")]
    NoOpenStep,

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Errors found when checking a whole autoresponder before it is saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an autoresponder id")]
    MissingAutoresponderId,

    #[error("Step '{step}' is a 'send email' step without an email template id")]
    MissingTemplateId { step: String },
}

/// Errors surfaced by the backend API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API URL or API key is not set")]
    MissingCredentials,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("API request failed. Response: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the dripflow crate so a
//! consumer can bring the whole editing surface in with one `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use dripflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut session = EditorSession::new("welcome-series");
//! session.wire_next("Start", "Confirmation", HumanTime::new(1, TimeUnit::Days))?;
//! println!("{}", to_diagram_text(session.autoresponder()));
//! # Ok(())
//! # }
//! ```

// Flow model and editing
pub use crate::flow::{
    Autoresponder, EditorSession, HumanTime, Outcome, Step, StepKind, TimeUnit, START_STEP,
};

// Diagram rendering
pub use crate::diagram::{to_diagram_text, DiagramBuilder, DiagramEdge, DiagramNode, NodeShape};

// Backend API client
pub use crate::client::{ApiClient, ApiConfig};

// Error types
pub use crate::error::{ApiError, EditError, TimeError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

//! # dripflow - Autoresponder Flow Engine
//!
//! **dripflow** models the timed, conditional email flows ("autoresponders")
//! of a list-based email platform: an in-memory directed graph of named
//! steps with invariant-preserving edit operations, deterministic flowchart
//! rendering, and an async client for the backend admin API.
//!
//! ## Core Workflow
//!
//! 1.  **Load or create**: fetch an [`flow::Autoresponder`] through the
//!     [`client::ApiClient`], or start from the pristine single-`Start`
//!     definition with [`flow::EditorSession::new`].
//! 2.  **Edit**: apply operations on the session - wiring successors,
//!     branching on tags, renaming and deleting steps. Each operation
//!     validates first and leaves the graph untouched on error.
//! 3.  **Visualize**: render the graph to mermaid `graph TD` text with
//!     [`diagram::DiagramBuilder`].
//! 4.  **Save**: validate and POST the full definition back; the backend
//!     performs a create-or-update keyed by autoresponder id.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dripflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // A new flow has a single 'Start' step of kind 'send email'.
//!     let mut session = EditorSession::new("welcome-series");
//!
//!     // Wire a confirmation email one day after Start. The target step
//!     // is created on first mention.
//!     session.wire_next("Start", "Confirmation", HumanTime::new(1, TimeUnit::Days))?;
//!
//!     // Branch on a tag: VIPs get their own offer.
//!     session.set_step_kind("Confirmation", StepKind::Choice)?;
//!     session.open_step("Confirmation")?;
//!     session.set_tag_to_check("vip")?;
//!     session.wire_branch("Confirmation", Outcome::Yes, "SendVipOffer")?;
//!
//!     // Render the flowchart.
//!     println!("{}", to_diagram_text(session.autoresponder()));
//!
//!     // Persist through the backend API.
//!     let autoresponder = session.into_autoresponder();
//!     autoresponder.validate()?;
//!     let client = ApiClient::new(ApiConfig::from_env()?);
//!     tokio::runtime::Runtime::new()?.block_on(client.put_autoresponder(&autoresponder))?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod diagram;
pub mod error;
pub mod flow;
pub mod prelude;

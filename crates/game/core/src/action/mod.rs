//! Action domain - from a normalized request to committed effects.
//!
//! # Module Structure
//!
//! - `request`: `ActionRequest` plus the `Command` / `Intent` shapes that feed it
//! - `validation`: upfront admission producing an `ActionPlan` or a `Rejection`
//! - `sequence`: the resumable `ActionSequence` state machine
//! - `hooks`: presentation and popup collaborators
pub mod hooks;
pub mod request;
pub mod sequence;
pub mod validation;

pub use hooks::{NoPresentation, PopupSink, Presentation, PresentationEvent, PresentationLog};
pub use request::{ActionKind, ActionRequest, Command, CommandKind, Intent, IntentKind};
pub use sequence::{ActionOutcome, ActionReport, ActionSequence, AppliedEffect, SequenceContext};
pub use validation::{ActionPlan, admit};

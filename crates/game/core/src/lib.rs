//! Deterministic battle rules shared by the runtime and any frontend.
//!
//! `battle-core` defines combatants, authored definitions, the numeric effect
//! resolver, and the resumable tasks that make up a turn: the action
//! sequencer, the target selector and the action list selector. Nothing here
//! performs I/O or keeps time; an external scheduler drives every
//! [`task::Task`] and elapses the waits it reports.
pub mod action;
pub mod combat;
pub mod config;
pub mod definition;
pub mod error;
pub mod select;
pub mod state;
pub mod task;

pub use action::{
    ActionKind, ActionOutcome, ActionPlan, ActionReport, ActionRequest, ActionSequence,
    AppliedEffect, Command, CommandKind, Intent, IntentKind, NoPresentation, PopupSink,
    Presentation, PresentationEvent, PresentationLog, SequenceContext, admit,
};
pub use combat::{heal_amount, physical};
pub use config::{ActionTiming, BattleConfig, DamageParams, SP_CAP};
pub use definition::{EffectType, ItemDefinition, SkillDefinition, StatusDefinition};
pub use error::{BattleError, FailureClass, Rejection};
pub use select::{
    ActionMenu, InputEvents, InputSource, ListCursor, MenuEntry, MenuKind, MenuResult,
    ScriptedInput, SelectContext, SelectionResult, SelectionView, TargetMode, TargetSelection,
};
pub use state::{
    CombatStats, Combatant, CombatantId, Inventory, ItemStack, ResourceChanged, ResourceKind,
    ResourceMeter, ResourceObserver, Roster, Side, StatusSet, SubscriptionId,
};
pub use task::{Step, Suspend, Task};

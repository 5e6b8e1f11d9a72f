//! Unified error types surfaced by the runtime API.
//!
//! Rule-level failures (rejected actions, cancelled selections) are values in
//! `battle-core` and never show up here. These are orchestration failures.
use battle_core::{CombatantId, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("combatant {0} is not part of the roster")]
    UnknownCombatant(CombatantId),

    #[error("no live combatants on the {side} side")]
    NoLiveCombatants { side: Side },

    #[error("task did not finish within {ticks} scheduler ticks")]
    TaskStalled { ticks: u64 },
}

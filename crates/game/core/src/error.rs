//! Common error infrastructure for battle-core.
//!
//! Combat rules never fail loudly: an action that cannot run is *rejected*
//! before it mutates anything or suspends. This module defines the rejection
//! type and the classification shared by every failure the core can report.
//!
//! # Failure Classes
//!
//! - **MissingReference**: a required definition, target or combatant is absent
//! - **ResourceInsufficiency**: SP below cost, or an item could not be consumed
//!
//! Both classes have the same observable outcome (no mutation, no suspension);
//! the class only tells callers which gate fired.

use crate::state::CombatantId;

/// Classification of a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureClass {
    /// A skill, item, status, target list or combatant was missing.
    MissingReference,

    /// The actor could not pay for the action (SP or inventory).
    ResourceInsufficiency,
}

impl FailureClass {
    /// Returns a human-readable description of this class.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingReference => "missing_reference",
            Self::ResourceInsufficiency => "resource_insufficiency",
        }
    }
}

/// Common trait for all battle-core errors.
///
/// Mirrors a severity/code pair so runtimes can log and branch uniformly.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns which gate produced this failure.
    fn class(&self) -> FailureClass;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Reason an action request was turned away before execution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// Skill request carried no skill definition.
    #[error("no skill selected")]
    MissingSkill,

    /// Item request carried no item definition.
    #[error("no item selected")]
    MissingItem,

    /// ApplyStatus effect without a status definition.
    #[error("effect has no status to apply")]
    MissingStatus,

    /// Action needs at least one target and none were supplied.
    #[error("action requires a target")]
    MissingTargets,

    /// Actor or required target is not part of the roster.
    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),

    /// Actor does not have enough SP for the skill.
    #[error("insufficient SP: have {available}, need {required}")]
    InsufficientSp { available: u32, required: u32 },

    /// Inventory refused to hand out the item.
    #[error("item could not be consumed")]
    ItemUnavailable,
}

impl BattleError for Rejection {
    fn class(&self) -> FailureClass {
        use Rejection::*;
        match self {
            MissingSkill | MissingItem | MissingStatus | MissingTargets | UnknownCombatant(_) => {
                FailureClass::MissingReference
            }
            InsufficientSp { .. } | ItemUnavailable => FailureClass::ResourceInsufficiency,
        }
    }

    fn error_code(&self) -> &'static str {
        use Rejection::*;
        match self {
            MissingSkill => "ACTION_MISSING_SKILL",
            MissingItem => "ACTION_MISSING_ITEM",
            MissingStatus => "ACTION_MISSING_STATUS",
            MissingTargets => "ACTION_MISSING_TARGETS",
            UnknownCombatant(_) => "ACTION_UNKNOWN_COMBATANT",
            InsufficientSp { .. } => "ACTION_INSUFFICIENT_SP",
            ItemUnavailable => "ACTION_ITEM_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_gates_are_classified_separately() {
        let sp = Rejection::InsufficientSp {
            available: 0,
            required: 1,
        };
        assert_eq!(sp.class(), FailureClass::ResourceInsufficiency);
        assert_eq!(Rejection::ItemUnavailable.class(), FailureClass::ResourceInsufficiency);
        assert_eq!(Rejection::MissingSkill.class(), FailureClass::MissingReference);
        assert_eq!(sp.to_string(), "insufficient SP: have 0, need 1");
    }
}

//! Action admission - checks performed before anything is committed.
//!
//! Every gate that can turn an action into a no-op lives here, so the
//! sequencer's happy path never has to back out of a half-applied action.
//!
//! ## Gates (in order)
//!
//! - Actor exists
//! - Required definition present (skill, item, status for ApplyStatus)
//! - Required targets present
//! - Resources available (SP, inventory units)

use std::sync::Arc;

use crate::action::request::{ActionKind, ActionRequest};
use crate::definition::{EffectType, ItemDefinition, SkillDefinition};
use crate::error::Rejection;
use crate::state::{CombatantId, Roster};

/// An admitted action, with every optional reference resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionPlan {
    BasicAttack {
        target: CombatantId,
    },
    Skill {
        skill: Arc<SkillDefinition>,
        targets: Vec<CombatantId>,
    },
    Item {
        item: Arc<ItemDefinition>,
        targets: Vec<CombatantId>,
    },
    Guard,
}

/// Validates a request against the current roster without mutating it.
///
/// ## Errors
/// - `Rejection::UnknownCombatant` - actor (or basic attack target) missing
/// - `Rejection::MissingSkill` / `MissingItem` - no definition supplied
/// - `Rejection::MissingTargets` - targets required but none supplied
/// - `Rejection::MissingStatus` - ApplyStatus effect without a status
/// - `Rejection::InsufficientSp` - actor SP below skill cost
/// - `Rejection::ItemUnavailable` - actor's inventory has no unit left
pub fn admit(
    actor: CombatantId,
    request: &ActionRequest,
    roster: &Roster,
) -> Result<ActionPlan, Rejection> {
    let combatant = roster
        .get(actor)
        .ok_or(Rejection::UnknownCombatant(actor))?;

    match &request.kind {
        ActionKind::BasicAttack => {
            let target = *request.targets.first().ok_or(Rejection::MissingTargets)?;
            if !roster.contains(target) {
                return Err(Rejection::UnknownCombatant(target));
            }
            Ok(ActionPlan::BasicAttack { target })
        }

        ActionKind::Skill(skill) => {
            let skill = skill.as_ref().ok_or(Rejection::MissingSkill)?;
            if skill.requires_targets() && request.targets.is_empty() {
                return Err(Rejection::MissingTargets);
            }
            if skill.effect == EffectType::ApplyStatus && skill.status_to_apply.is_none() {
                return Err(Rejection::MissingStatus);
            }
            if combatant.current_sp() < skill.sp_cost {
                return Err(Rejection::InsufficientSp {
                    available: combatant.current_sp(),
                    required: skill.sp_cost,
                });
            }
            Ok(ActionPlan::Skill {
                skill: Arc::clone(skill),
                targets: request.targets.clone(),
            })
        }

        ActionKind::Item(item) => {
            let item = item.as_ref().ok_or(Rejection::MissingItem)?;
            if item.effect == EffectType::ApplyStatus && item.status_to_apply.is_none() {
                return Err(Rejection::MissingStatus);
            }
            // No inventory means unlimited use.
            if let Some(inventory) = &combatant.inventory
                && inventory.count_of(&item.id) == 0
            {
                return Err(Rejection::ItemUnavailable);
            }
            Ok(ActionPlan::Item {
                item: Arc::clone(item),
                targets: request.targets.clone(),
            })
        }

        ActionKind::Guard => Ok(ActionPlan::Guard),
    }
}

//! Damage and heal calculation.

use crate::config::DamageParams;
use crate::definition::SkillDefinition;
use crate::state::CombatStats;

/// Calculate physical damage from an attack or damaging skill.
///
/// # Formula
///
/// ```text
/// base = override_power ? power
///      : attack + (skill ? power : basic_attack_power)
/// mitigated = base - defense / defense_divisor
/// final = base > 0 ? max(mitigated, minimum_damage) : 0
/// ```
///
/// Pure and total: identical inputs always give the same result, and the
/// arithmetic saturates instead of overflowing.
pub fn physical(
    skill: Option<&SkillDefinition>,
    attacker: &CombatStats,
    defender: &CombatStats,
    power: u32,
    override_power: bool,
    params: &DamageParams,
) -> u32 {
    let base = if override_power {
        power
    } else {
        let bonus = match skill {
            Some(_) => power,
            None => params.basic_attack_power,
        };
        attacker.attack.saturating_add(bonus)
    };

    if base == 0 {
        return 0;
    }

    let reduction = defender
        .defense
        .checked_div(params.defense_divisor)
        .unwrap_or(0);

    base.saturating_sub(reduction).max(params.minimum_damage)
}

/// Heal amount for a target with the given maximum HP.
///
/// Percent heals are a share of `target_max_hp` rounded down; flat heals
/// are `power` itself.
pub fn heal_amount(target_max_hp: u32, power: u32, is_percent: bool) -> u32 {
    if is_percent {
        (u64::from(target_max_hp) * u64::from(power) / 100).min(u64::from(u32::MAX)) as u32
    } else {
        power
    }
}

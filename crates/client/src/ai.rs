//! Scripted AI surrogate used for both sides of an automated encounter.
//!
//! Priorities, first match wins:
//! 1. Heal the most wounded ally below [`SurrogateAi::heal_threshold`] with an
//!    affordable heal skill, else with a heal item from the inventory
//! 2. Cast the strongest affordable damage skill at the weakest foe
//! 3. Basic attack the weakest foe
//!
//! "Weakest" and "most wounded" both mean lowest HP percentage; ties go to
//! the first combatant in roster order.

use std::sync::Arc;

use battle_core::{
    Combatant, CombatantId, EffectType, Intent, ItemDefinition, Roster, SkillDefinition,
};
use battle_runtime::{Controller, Decision};

/// HP percentage of a combatant, 0 for a zero-HP maximum.
fn health_percentage(combatant: &Combatant) -> u32 {
    match combatant.max_hp() {
        0 => 0,
        max => combatant.current_hp() * 100 / max,
    }
}

fn weakest(roster: &Roster, pool: &[CombatantId]) -> Option<CombatantId> {
    pool.iter()
        .filter_map(|&id| roster.get(id).map(|c| (id, health_percentage(c))))
        .min_by_key(|&(_, pct)| pct)
        .map(|(id, _)| id)
}

#[derive(Clone, Copy, Debug)]
pub struct SurrogateAi {
    /// Allies at or below this HP percentage are worth healing.
    pub heal_threshold: u32,
}

impl Default for SurrogateAi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HEAL_THRESHOLD)
    }
}

impl SurrogateAi {
    pub const DEFAULT_HEAL_THRESHOLD: u32 = 40;

    pub fn new(heal_threshold: u32) -> Self {
        Self { heal_threshold }
    }

    fn heal_skill(me: &Combatant, actor: CombatantId, patient: CombatantId) -> Option<Arc<SkillDefinition>> {
        me.skills
            .iter()
            .filter(|s| s.effect == EffectType::Heal && s.sp_cost <= me.current_sp())
            .find(|s| !s.targets_self_only || patient == actor)
            .cloned()
    }

    fn heal_item(me: &Combatant) -> Option<Arc<ItemDefinition>> {
        me.inventory
            .as_ref()?
            .available()
            .find(|stack| stack.item.effect == EffectType::Heal)
            .map(|stack| Arc::clone(&stack.item))
    }

    fn damage_skill(me: &Combatant) -> Option<Arc<SkillDefinition>> {
        me.skills
            .iter()
            .filter(|s| s.effect == EffectType::Damage && s.sp_cost <= me.current_sp())
            .max_by_key(|s| s.power)
            .cloned()
    }

    /// Picks an intent for `actor`. An unknown actor or an empty opposing side
    /// produces the empty intent.
    pub fn intent(&self, actor: CombatantId, roster: &Roster) -> Intent {
        let Some(me) = roster.get(actor) else {
            return Intent::default();
        };
        let allies = roster.live(&roster.side(me.side));
        let foes = roster.live(&roster.side(me.side.opponent()));
        let Some(target) = weakest(roster, &foes) else {
            return Intent::default();
        };

        if let Some(patient) = weakest(roster, &allies)
            && roster
                .get(patient)
                .is_some_and(|c| health_percentage(c) <= self.heal_threshold)
        {
            if let Some(skill) = Self::heal_skill(me, actor, patient) {
                let targets = if skill.targets_self_only {
                    Vec::new()
                } else {
                    vec![patient]
                };
                return Intent::skill(skill, targets);
            }
            if let Some(item) = Self::heal_item(me) {
                return Intent::item(item, vec![patient]);
            }
        }

        match Self::damage_skill(me) {
            Some(skill) => Intent::skill(skill, vec![target]),
            None => Intent::basic_attack(target),
        }
    }
}

impl Controller for SurrogateAi {
    fn decide(&mut self, actor: CombatantId, roster: &Roster) -> Decision {
        let intent = self.intent(actor, roster);
        tracing::debug!(%actor, kind = ?intent.kind, targets = ?intent.targets, "surrogate decided");
        Decision::Intent(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatStats, Inventory, IntentKind, Side};

    fn duel() -> (Roster, CombatantId, CombatantId, CombatantId) {
        let mut roster = Roster::new();
        let hero = roster.insert(
            Combatant::new("hero", Side::Party, 40, 6).with_stats(CombatStats::new(5, 1)),
        );
        let orc = roster.insert(Combatant::new("orc", Side::Enemy, 30, 0));
        let imp = roster.insert(Combatant::new("imp", Side::Enemy, 10, 0).with_hp(3));
        (roster, hero, orc, imp)
    }

    #[test]
    fn attacks_the_weakest_foe_without_skills() {
        let (roster, hero, _, imp) = duel();
        let intent = SurrogateAi::default().intent(hero, &roster);
        assert_eq!(intent, Intent::basic_attack(imp));
    }

    #[test]
    fn prefers_the_strongest_affordable_damage_skill() {
        let (mut roster, hero, _, imp) = duel();
        let jab = Arc::new(SkillDefinition::new("jab", EffectType::Damage, 2).with_cost(1));
        let nova = Arc::new(SkillDefinition::new("nova", EffectType::Damage, 9).with_cost(9));
        let slash = Arc::new(SkillDefinition::new("slash", EffectType::Damage, 5).with_cost(2));
        if let Some(c) = roster.get_mut(hero) {
            c.skills = vec![jab, nova, Arc::clone(&slash)];
            c.set_sp(2);
        }

        let intent = SurrogateAi::default().intent(hero, &roster);

        assert_eq!(intent, Intent::skill(slash, vec![imp]));
    }

    #[test]
    fn wounded_actor_heals_itself_with_a_self_only_skill() {
        let (mut roster, hero, ..) = duel();
        let mend = Arc::new(
            SkillDefinition::new("mend", EffectType::Heal, 10)
                .with_cost(1)
                .self_only(),
        );
        if let Some(c) = roster.get_mut(hero) {
            c.skills = vec![Arc::clone(&mend)];
            c.set_sp(1);
            c.set_hp(8);
        }

        let intent = SurrogateAi::default().intent(hero, &roster);

        assert_eq!(intent, Intent::skill(mend, Vec::new()));
    }

    #[test]
    fn falls_back_to_a_heal_item_when_sp_is_short() {
        let (mut roster, hero, ..) = duel();
        let potion = Arc::new(ItemDefinition::new("potion", EffectType::Heal, 12));
        let mut inventory = Inventory::empty();
        inventory.add(Arc::clone(&potion), 1);
        if let Some(c) = roster.get_mut(hero) {
            c.skills = vec![Arc::new(
                SkillDefinition::new("mend", EffectType::Heal, 10).with_cost(3),
            )];
            c.inventory = Some(inventory);
            c.set_hp(5);
        }

        let intent = SurrogateAi::default().intent(hero, &roster);

        assert_eq!(intent.kind, IntentKind::Item);
        assert_eq!(intent.item, Some(potion));
        assert_eq!(intent.targets, vec![hero]);
    }

    #[test]
    fn no_foes_left_yields_the_empty_intent() {
        let mut roster = Roster::new();
        let hero = roster.insert(Combatant::new("hero", Side::Party, 10, 0));
        roster.insert(Combatant::new("ghost", Side::Enemy, 10, 0).with_hp(0));

        let intent = SurrogateAi::default().intent(hero, &roster);

        assert_eq!(intent, Intent::default());
    }

    #[test]
    fn heal_threshold_decides_when_to_heal() {
        let (mut roster, hero, _, imp) = duel();
        let mend = Arc::new(
            SkillDefinition::new("mend", EffectType::Heal, 10)
                .with_cost(1)
                .self_only(),
        );
        if let Some(c) = roster.get_mut(hero) {
            c.skills = vec![Arc::clone(&mend)];
            c.set_sp(1);
            c.set_hp(20);
        }

        assert_eq!(SurrogateAi::new(50).intent(hero, &roster), Intent::skill(mend, Vec::new()));
        assert_eq!(SurrogateAi::new(49).intent(hero, &roster), Intent::basic_attack(imp));
    }
}

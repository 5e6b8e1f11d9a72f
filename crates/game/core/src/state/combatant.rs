use std::sync::Arc;

use super::inventory::Inventory;
use super::observer::{ObserverList, ResourceChanged, ResourceKind, ResourceObserver, SubscriptionId};
use super::status::StatusSet;
use super::{CombatantId, ResourceMeter, Side};
use crate::config::{ActionTiming, SP_CAP};
use crate::definition::{SkillDefinition, StatusDefinition};

/// Offensive and defensive statistics read by the damage resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
}

impl CombatStats {
    pub const fn new(attack: u32, defense: u32) -> Self {
        Self { attack, defense }
    }
}

/// One participant in a battle.
///
/// # Invariants
///
/// - `0 <= hp.current <= hp.maximum`
/// - `0 <= sp.current <= sp.maximum <= SP_CAP`
/// - Every HP/SP mutation notifies observers before returning
#[derive(Clone, Debug)]
pub struct Combatant {
    pub(crate) id: CombatantId,
    pub name: String,
    pub side: Side,
    pub stats: CombatStats,
    pub timing: ActionTiming,
    pub skills: Vec<Arc<SkillDefinition>>,
    pub inventory: Option<Inventory>,
    hp: ResourceMeter,
    sp: ResourceMeter,
    statuses: StatusSet,
    observers: ObserverList,
}

impl Combatant {
    /// Creates a combatant at full HP with no SP.
    ///
    /// `max_sp` is clamped to [`SP_CAP`]. The id is assigned when the
    /// combatant joins a [`super::Roster`].
    pub fn new(name: impl Into<String>, side: Side, max_hp: u32, max_sp: u32) -> Self {
        Self {
            id: CombatantId::UNASSIGNED,
            name: name.into(),
            side,
            stats: CombatStats::default(),
            timing: ActionTiming::default(),
            skills: Vec::new(),
            inventory: None,
            hp: ResourceMeter::full(max_hp),
            sp: ResourceMeter::new(0, max_sp.min(SP_CAP)),
            statuses: StatusSet::empty(),
            observers: ObserverList::new(),
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_timing(mut self, timing: ActionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_hp(mut self, current: u32) -> Self {
        self.hp = ResourceMeter::new(current, self.hp.maximum);
        self
    }

    pub fn with_sp(mut self, current: u32) -> Self {
        self.sp = ResourceMeter::new(current, self.sp.maximum);
        self
    }

    pub fn with_skills(mut self, skills: Vec<Arc<SkillDefinition>>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn current_hp(&self) -> u32 {
        self.hp.current
    }

    pub fn max_hp(&self) -> u32 {
        self.hp.maximum
    }

    pub fn current_sp(&self) -> u32 {
        self.sp.current
    }

    pub fn max_sp(&self) -> u32 {
        self.sp.maximum
    }

    pub fn is_alive(&self) -> bool {
        self.hp.current > 0
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    /// Sets HP, clamping into `[0, max_hp]`, then notifies observers.
    ///
    /// Takes a signed value so callers can subtract past zero and let the
    /// combatant clamp.
    pub fn set_hp(&mut self, value: i64) {
        let previous = self.hp.set_clamped(value);
        self.notify(ResourceKind::Hp, previous, self.hp);
    }

    /// Sets SP, clamping into `[0, max_sp]`, then notifies observers.
    pub fn set_sp(&mut self, value: i64) {
        let previous = self.sp.set_clamped(value);
        self.notify(ResourceKind::Sp, previous, self.sp);
    }

    /// Adds SP, capped at `max_sp`.
    pub fn gain_sp(&mut self, amount: u32) {
        self.set_sp(i64::from(self.sp.current) + i64::from(amount));
    }

    pub fn add_status(&mut self, status: Arc<StatusDefinition>) {
        self.statuses.add(status);
    }

    pub fn subscribe(&mut self, observer: impl ResourceObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self, resource: ResourceKind, previous: u32, meter: ResourceMeter) {
        let change = ResourceChanged {
            combatant: self.id,
            resource,
            previous,
            current: meter.current,
            maximum: meter.maximum,
        };
        self.observers.notify(&change);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn hp_is_clamped_on_both_ends() {
        let mut hero = Combatant::new("hero", Side::Party, 20, 3);
        hero.set_hp(-15);
        assert_eq!(hero.current_hp(), 0);
        assert!(!hero.is_alive());

        hero.set_hp(500);
        assert_eq!(hero.current_hp(), 20);
    }

    #[test]
    fn max_sp_is_capped() {
        let mut mage = Combatant::new("mage", Side::Party, 10, 40).with_sp(40);
        assert_eq!(mage.max_sp(), SP_CAP);
        assert_eq!(mage.current_sp(), SP_CAP);

        mage.gain_sp(1);
        assert_eq!(mage.current_sp(), SP_CAP);
    }

    #[test]
    fn every_set_call_notifies_with_committed_values() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hero = Combatant::new("hero", Side::Party, 10, 2).with_sp(2);
        let sink = Rc::clone(&seen);
        hero.subscribe(move |c: &ResourceChanged| sink.borrow_mut().push(*c));

        hero.set_hp(4);
        hero.gain_sp(1);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].resource, ResourceKind::Hp);
        assert_eq!((seen[0].previous, seen[0].current), (10, 4));
        assert_eq!(seen[1].resource, ResourceKind::Sp);
        assert_eq!((seen[1].previous, seen[1].current), (2, 2));
    }

    #[test]
    fn status_application_leaves_resources_alone() {
        let mut hero = Combatant::new("hero", Side::Party, 10, 2).with_hp(7).with_sp(1);
        hero.add_status(Arc::new(StatusDefinition::new("guarded", "Guarded")));

        assert_eq!(hero.current_hp(), 7);
        assert_eq!(hero.current_sp(), 1);
        assert!(hero.statuses().contains("guarded"));
    }
}

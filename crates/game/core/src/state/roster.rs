use super::{Combatant, CombatantId, Side};

/// Owns every combatant in a battle.
///
/// Ids are assigned on insertion and stay stable for the lifetime of the
/// roster; combatants are never removed, only defeated.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant and returns its id.
    pub fn insert(&mut self, mut combatant: Combatant) -> CombatantId {
        let id = CombatantId(self.combatants.len() as u32);
        combatant.id = id;
        self.combatants.push(combatant);
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.get(id).is_some()
    }

    /// Returns true if the combatant exists and has HP left.
    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.combatants.iter().map(Combatant::id)
    }

    /// Every member of a side in roster order, alive or not.
    pub fn side(&self, side: Side) -> Vec<CombatantId> {
        self.combatants
            .iter()
            .filter(|c| c.side == side)
            .map(Combatant::id)
            .collect()
    }

    /// Filters `pool` down to live combatants, preserving order.
    pub fn live(&self, pool: &[CombatantId]) -> Vec<CombatantId> {
        pool.iter().copied().filter(|&id| self.is_alive(id)).collect()
    }

    /// Returns true if any member of the side is still alive.
    pub fn side_alive(&self, side: Side) -> bool {
        self.combatants
            .iter()
            .any(|c| c.side == side && c.is_alive())
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_filter_preserves_pool_order() {
        let mut roster = Roster::new();
        let a = roster.insert(Combatant::new("a", Side::Enemy, 10, 0).with_hp(0));
        let b = roster.insert(Combatant::new("b", Side::Enemy, 10, 0));
        let c = roster.insert(Combatant::new("c", Side::Enemy, 10, 0));

        assert_eq!(roster.live(&[c, a, b]), vec![c, b]);
        assert_eq!(roster.side(Side::Enemy), vec![a, b, c]);
        assert!(roster.side_alive(Side::Enemy));
        assert!(!roster.side_alive(Side::Party));
    }

    #[test]
    fn unknown_ids_are_not_alive() {
        let roster = Roster::new();
        assert!(!roster.is_alive(CombatantId(3)));
        assert!(roster.live(&[CombatantId(3)]).is_empty());
    }
}

//! Active status effects on a combatant.
//!
//! The set is purely additive during a battle: applying a status never
//! touches health or resources, and no stacking rules are enforced.

use std::sync::Arc;

use crate::definition::StatusDefinition;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSet {
    effects: Vec<Arc<StatusDefinition>>,
}

impl StatusSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add(&mut self, status: Arc<StatusDefinition>) {
        self.effects.push(status);
    }

    /// Checks whether a status with the given id is active.
    pub fn contains(&self, id: &str) -> bool {
        self.effects.iter().any(|s| s.id == id)
    }

    /// Number of applications of the given status.
    pub fn count(&self, id: &str) -> usize {
        self.effects.iter().filter(|s| s.id == id).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<StatusDefinition>> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_application_is_kept() {
        let poison = Arc::new(StatusDefinition::new("poison", "Poison"));
        let mut set = StatusSet::empty();
        set.add(Arc::clone(&poison));
        set.add(poison);

        assert!(set.contains("poison"));
        assert_eq!(set.count("poison"), 2);
        assert!(!set.contains("haste"));
    }
}

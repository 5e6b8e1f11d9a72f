//! Item inventory carried by a combatant.
//!
//! Only the consume/check contract matters to combat: a combatant without an
//! inventory uses items without limit.

use std::sync::Arc;

use crate::definition::ItemDefinition;

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: Arc<ItemDefinition>,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: Arc<ItemDefinition>, count: u32) -> Self {
        Self { item, count }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    /// Builds an inventory holding one stack per item id; duplicates are merged.
    pub fn new(stacks: Vec<ItemStack>) -> Self {
        let mut inventory = Self::default();
        for stack in stacks {
            inventory.add(stack.item, stack.count);
        }
        inventory
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds units of an item, merging into an existing stack with the same id.
    pub fn add(&mut self, item: Arc<ItemDefinition>, count: u32) {
        match self.stacks.iter_mut().find(|s| s.item.id == item.id) {
            Some(stack) => stack.count = stack.count.saturating_add(count),
            None => self.stacks.push(ItemStack::new(item, count)),
        }
    }

    /// Removes `count` units if enough are held; otherwise leaves the stack untouched.
    pub fn try_consume(&mut self, item: &ItemDefinition, count: u32) -> bool {
        match self.stacks.iter_mut().find(|s| s.item.id == item.id) {
            Some(stack) if stack.count >= count => {
                stack.count -= count;
                true
            }
            _ => false,
        }
    }

    pub fn count_of(&self, id: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.item.id == id)
            .map(|s| s.count)
            .sum()
    }

    /// Stacks that still hold at least one unit, in inventory order.
    pub fn available(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.iter().filter(|s| s.count > 0)
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::EffectType;

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("potion", EffectType::Heal, 10))
    }

    #[test]
    fn consume_fails_without_enough_units() {
        let item = potion();
        let mut inventory = Inventory::new(vec![ItemStack::new(Arc::clone(&item), 1)]);

        assert!(inventory.try_consume(&item, 1));
        assert!(!inventory.try_consume(&item, 1));
        assert_eq!(inventory.count_of("potion"), 0);
        assert_eq!(inventory.available().count(), 0);
    }

    #[test]
    fn add_merges_stacks() {
        let item = potion();
        let mut inventory = Inventory::empty();
        inventory.add(Arc::clone(&item), 2);
        inventory.add(item, 3);

        assert_eq!(inventory.stacks().len(), 1);
        assert_eq!(inventory.count_of("potion"), 5);
    }

    #[test]
    fn duplicate_ids_share_one_stack() {
        let item = potion();
        let mut inventory = Inventory::new(vec![
            ItemStack::new(Arc::clone(&item), 0),
            ItemStack::new(Arc::clone(&item), 2),
        ]);

        assert_eq!(inventory.stacks().len(), 1);
        assert!(inventory.try_consume(&item, 1));
        assert_eq!(inventory.count_of("potion"), 1);
    }
}

//! In-memory party inventory.

use std::collections::BTreeMap;

use battle_core::{InventoryOracle, ItemId};

/// Item counts and gold held by the party for the duration of a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryInventory {
    items: BTreeMap<ItemId, u32>,
    gold: u32,
}

impl MemoryInventory {
    pub fn new(gold: u32) -> Self {
        Self {
            items: BTreeMap::new(),
            gold,
        }
    }

    pub fn with_item(mut self, id: ItemId, count: u32) -> Self {
        self.add_item(id, count);
        self
    }

    pub fn add_item(&mut self, id: ItemId, count: u32) {
        if count > 0 {
            *self.items.entry(id).or_insert(0) += count;
        }
    }

    pub fn count(&self, id: ItemId) -> u32 {
        self.items.get(&id).copied().unwrap_or(0)
    }
}

impl InventoryOracle for MemoryInventory {
    fn has_item(&self, id: ItemId) -> bool {
        self.count(id) > 0
    }

    fn remove_item(&mut self, id: ItemId) -> bool {
        match self.items.get_mut(&id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(&id);
                true
            }
            None => false,
        }
    }

    fn gold(&self) -> u32 {
        self.gold
    }

    fn remove_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_consumed_one_at_a_time() {
        let mut inventory = MemoryInventory::new(0).with_item(ItemId(1), 2);
        assert!(inventory.remove_item(ItemId(1)));
        assert!(inventory.has_item(ItemId(1)));
        assert!(inventory.remove_item(ItemId(1)));
        assert!(!inventory.has_item(ItemId(1)));
        assert!(!inventory.remove_item(ItemId(1)));
    }

    #[test]
    fn gold_never_goes_negative() {
        let mut inventory = MemoryInventory::new(50);
        assert!(!inventory.remove_gold(60));
        assert_eq!(inventory.gold(), 50);
        assert!(inventory.remove_gold(50));
        assert_eq!(inventory.gold(), 0);
    }
}

//! Inventory collaborator and the in-memory stash.

use super::types::{GearSlot, Item};
use crate::character::Character;
use crate::core::constants::MAX_STACK_SIZE;
use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Where reward drops go. The engine only ever adds items.
pub trait Inventory {
    fn add_item(&mut self, item: Item);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

/// Stacked item storage. Identical items share a stack of up to 99.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stash {
    pub stacks: Vec<ItemStack>,
}

impl Stash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Total number of items across all stacks.
    pub fn total_items(&self) -> u32 {
        self.stacks.iter().map(|s| s.quantity).sum()
    }

    /// Equips one item from the stack at `index`. The previously worn piece
    /// in that slot goes back into the stash.
    pub fn equip(&mut self, index: usize, character: &mut Character) -> Result<()> {
        let stack = self
            .stacks
            .get_mut(index)
            .ok_or(EngineError::NoSuchItem(index))?;
        let Some(remaining) = stack.quantity.checked_sub(1) else {
            // Empty stacks only come from hand-edited saves.
            self.stacks.remove(index);
            return Err(EngineError::NoSuchItem(index));
        };
        stack.quantity = remaining;
        let item = stack.item.clone();
        if remaining == 0 {
            self.stacks.remove(index);
        }

        if let Some(old) = character.equip(item) {
            self.add_item(old);
        }
        Ok(())
    }

    /// Moves the worn piece in `slot` back into the stash.
    pub fn unequip(&mut self, slot: GearSlot, character: &mut Character) -> Result<()> {
        let item = character.unequip(slot).ok_or(EngineError::EmptySlot(slot))?;
        self.add_item(item);
        Ok(())
    }
}

impl Inventory for Stash {
    fn add_item(&mut self, item: Item) {
        if let Some(stack) = self
            .stacks
            .iter_mut()
            .find(|s| s.item.stacks_with(&item) && s.quantity < MAX_STACK_SIZE)
        {
            stack.quantity += 1;
        } else {
            self.stacks.push(ItemStack { item, quantity: 1 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::GearTier;
    use super::*;

    fn weapon(tier: u32) -> Item {
        Item::of_tier(GearTier::new(tier), GearSlot::Weapon)
    }

    #[test]
    fn test_identical_items_stack() {
        let mut stash = Stash::new();
        stash.add_item(weapon(1));
        stash.add_item(weapon(1));
        stash.add_item(weapon(2));
        assert_eq!(stash.len(), 2);
        assert_eq!(stash.stacks[0].quantity, 2);
        assert_eq!(stash.total_items(), 3);
    }

    #[test]
    fn test_full_stack_starts_new_one() {
        let mut stash = Stash::new();
        for _ in 0..100 {
            stash.add_item(weapon(1));
        }
        assert_eq!(stash.len(), 2);
        assert_eq!(stash.stacks[0].quantity, 99);
        assert_eq!(stash.stacks[1].quantity, 1);
    }

    #[test]
    fn test_equip_swaps_old_piece_back() {
        let mut stash = Stash::new();
        let mut character = Character::new();
        stash.add_item(weapon(1));
        stash.add_item(weapon(2));

        stash.equip(0, &mut character).unwrap();
        assert_eq!(character.equipment.power(GearSlot::Weapon), 700);
        assert_eq!(stash.len(), 1);

        // Tier 2 is now at index 0
        stash.equip(0, &mut character).unwrap();
        assert_eq!(character.equipment.power(GearSlot::Weapon), 1500);
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.stacks[0].item, weapon(1));
    }

    #[test]
    fn test_equip_bad_index_rejected() {
        let mut stash = Stash::new();
        let mut character = Character::new();
        let err = stash.equip(3, &mut character).unwrap_err();
        assert!(matches!(err, EngineError::NoSuchItem(3)));
    }

    #[test]
    fn test_equip_from_empty_stack_rejected() {
        let mut stash = Stash::new();
        stash.stacks.push(ItemStack {
            item: weapon(3),
            quantity: 0,
        });
        let mut character = Character::new();

        let err = stash.equip(0, &mut character).unwrap_err();
        assert!(matches!(err, EngineError::NoSuchItem(0)));
        assert!(stash.is_empty());
        assert!(character.equipment.weapon.is_none());
    }

    #[test]
    fn test_unequip_empty_slot_rejected() {
        let mut stash = Stash::new();
        let mut character = Character::new();
        let err = stash.unequip(GearSlot::Armor, &mut character).unwrap_err();
        assert!(matches!(err, EngineError::EmptySlot(GearSlot::Armor)));
    }

    #[test]
    fn test_unequip_returns_item() {
        let mut stash = Stash::new();
        let mut character = Character::new();
        stash.add_item(Item::of_tier(GearTier::new(3), GearSlot::Armor));
        stash.equip(0, &mut character).unwrap();
        assert!(stash.is_empty());

        stash.unequip(GearSlot::Armor, &mut character).unwrap();
        assert_eq!(stash.total_items(), 1);
        assert!(character.equipment.armor.is_none());
    }
}

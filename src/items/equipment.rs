use super::types::{GearSlot, Item};
use serde::{Deserialize, Serialize};

/// The two gear slots worn by the character.
///
/// IMPORTANT: When adding new slots, use `#[serde(default)]` so older saves
/// still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: GearSlot) -> Option<&Item> {
        match slot {
            GearSlot::Weapon => self.weapon.as_ref(),
            GearSlot::Armor => self.armor.as_ref(),
        }
    }

    /// Puts `item` in `slot`, returning whatever was there.
    pub fn set(&mut self, slot: GearSlot, item: Option<Item>) -> Option<Item> {
        match slot {
            GearSlot::Weapon => std::mem::replace(&mut self.weapon, item),
            GearSlot::Armor => std::mem::replace(&mut self.armor, item),
        }
    }

    /// Power contributed by a slot, 0 when empty.
    pub fn power(&self, slot: GearSlot) -> u64 {
        self.get(slot).map_or(0, |item| item.power)
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::GearTier;
    use super::*;

    #[test]
    fn test_empty_equipment_has_no_power() {
        let equipment = Equipment::new();
        assert_eq!(equipment.power(GearSlot::Weapon), 0);
        assert_eq!(equipment.power(GearSlot::Armor), 0);
        assert!(equipment.get(GearSlot::Armor).is_none());
    }

    #[test]
    fn test_set_returns_previous() {
        let mut equipment = Equipment::new();
        let first = Item::of_tier(GearTier::new(1), GearSlot::Weapon);
        let second = Item::of_tier(GearTier::new(2), GearSlot::Weapon);

        assert!(equipment.set(GearSlot::Weapon, Some(first.clone())).is_none());
        let old = equipment.set(GearSlot::Weapon, Some(second));
        assert_eq!(old, Some(first));
        assert_eq!(equipment.power(GearSlot::Weapon), 1500);
        assert!(equipment.armor.is_none());
    }
}

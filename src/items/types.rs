use crate::core::constants::MAX_GEAR_TIER;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearSlot {
    Weapon,
    Armor,
}

impl GearSlot {
    pub fn name(&self) -> &'static str {
        match self {
            GearSlot::Weapon => "Weapon",
            GearSlot::Armor => "Armor",
        }
    }

    /// Drops alternate weapon, armor, weapon, ...
    pub fn for_drop_index(index: u32) -> Self {
        if index % 2 == 0 {
            GearSlot::Weapon
        } else {
            GearSlot::Armor
        }
    }
}

/// Rarity tier 1..=6. Higher tiers carry much larger power values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GearTier(u8);

impl GearTier {
    pub const BASIC: GearTier = GearTier(1);

    /// Clamps into `1..=6`.
    pub fn new(tier: u32) -> Self {
        Self(tier.clamp(1, MAX_GEAR_TIER as u32) as u8)
    }

    /// Drop tier for a world: `min(6, world)`.
    pub fn for_world(world: u32) -> Self {
        Self::new(world)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn power(&self) -> u64 {
        match self.0 {
            1 => 700,
            2 => 1500,
            3 => 3500,
            4 => 8500,
            5 => 20_000,
            _ => 50_000,
        }
    }

    pub fn gear_name(&self) -> &'static str {
        match self.0 {
            1 => "Saiyan Gear",
            2 => "Elite Gear",
            3 => "Legendary Gear",
            4 => "God Gear",
            5 => "Angel Gear",
            _ => "Omni Gear",
        }
    }

    /// Short rarity label shown on inventory tiles.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "B",
            2 => "R",
            3 => "L",
            4 => "S",
            5 => "SS",
            _ => "SSS",
        }
    }
}

impl Default for GearTier {
    fn default() -> Self {
        Self::BASIC
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: GearSlot,
    pub power: u64,
    pub tier: GearTier,
}

impl Item {
    /// Standard piece for a tier: tier name and tier power.
    pub fn of_tier(tier: GearTier, slot: GearSlot) -> Self {
        Self {
            name: tier.gear_name().to_string(),
            slot,
            power: tier.power(),
            tier,
        }
    }

    /// Whether two items can share an inventory stack.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self == other
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}, +{})",
            self.tier.label(),
            self.name,
            self.slot.name(),
            self.power
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_powers() {
        let powers: Vec<u64> = (1..=6).map(|t| GearTier::new(t).power()).collect();
        assert_eq!(powers, vec![700, 1500, 3500, 8500, 20_000, 50_000]);
    }

    #[test]
    fn test_tier_clamps() {
        assert_eq!(GearTier::new(0).value(), 1);
        assert_eq!(GearTier::for_world(9).value(), 6);
        assert_eq!(GearTier::for_world(3).gear_name(), "Legendary Gear");
    }

    #[test]
    fn test_drop_slots_alternate() {
        let slots: Vec<GearSlot> = (0..4).map(GearSlot::for_drop_index).collect();
        assert_eq!(
            slots,
            vec![
                GearSlot::Weapon,
                GearSlot::Armor,
                GearSlot::Weapon,
                GearSlot::Armor
            ]
        );
    }

    #[test]
    fn test_item_of_tier() {
        let item = Item::of_tier(GearTier::new(4), GearSlot::Armor);
        assert_eq!(item.name, "God Gear");
        assert_eq!(item.power, 8500);
        assert_eq!(item.tier.label(), "S");
    }

    #[test]
    fn test_item_display() {
        let item = Item::of_tier(GearTier::new(2), GearSlot::Weapon);
        assert_eq!(item.to_string(), "[R] Elite Gear (Weapon, +1500)");
    }
}

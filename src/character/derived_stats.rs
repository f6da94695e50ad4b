use super::types::Character;
use crate::core::constants::*;
use crate::items::GearSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub attack: u64,
    pub defense: u64,
    pub max_hp: u64,
    pub power: u64,
}

impl DerivedStats {
    /// Calculates effective stats from base stats, rank and worn gear.
    ///
    /// Nothing here is cached. Call it again after any change to rank, gear
    /// or base stats.
    pub fn calculate(character: &Character) -> Self {
        let rank = character.rank as u64;
        let weapon = character.equipment.power(GearSlot::Weapon);
        let armor = character.equipment.power(GearSlot::Armor);

        // Attack = base + rank*400 + weapon
        let attack = character.base_attack + rank * RANK_ATTACK_BONUS + weapon;

        // Defense = base + rank*150 + armor
        let defense = character.base_defense + rank * RANK_DEFENSE_BONUS + armor;

        // Max HP = base + rank*2500 + armor
        let max_hp = character.base_max_hp + rank * RANK_HP_BONUS + armor;

        Self {
            attack,
            defense,
            max_hp,
            power: attack * POWER_ATTACK_WEIGHT + max_hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{GearTier, Item};

    #[test]
    fn test_derived_stats_base() {
        let stats = DerivedStats::calculate(&Character::new());
        assert_eq!(stats.attack, 40);
        assert_eq!(stats.defense, 25);
        assert_eq!(stats.max_hp, 500);
        assert_eq!(stats.power, 40 * 30 + 500);
    }

    #[test]
    fn test_rank_bonuses() {
        let mut c = Character::new();
        c.rank = 2;
        let stats = DerivedStats::calculate(&c);
        assert_eq!(stats.attack, 40 + 800);
        assert_eq!(stats.defense, 25 + 300);
        assert_eq!(stats.max_hp, 500 + 5000);
    }

    #[test]
    fn test_gear_bonuses() {
        let mut c = Character::new();
        c.equip(Item::of_tier(GearTier::new(2), GearSlot::Weapon));
        c.equip(Item::of_tier(GearTier::new(3), GearSlot::Armor));
        let stats = DerivedStats::calculate(&c);
        assert_eq!(stats.attack, 40 + 1500);
        assert_eq!(stats.defense, 25 + 3500);
        assert_eq!(stats.max_hp, 500 + 3500);
        assert_eq!(stats.power, 1540 * 30 + 4000);
    }

    #[test]
    fn test_swapping_gear_is_reflected_immediately() {
        let mut c = Character::new();
        c.equip(Item::of_tier(GearTier::new(1), GearSlot::Weapon));
        assert_eq!(c.effective_attack(), 740);
        c.equip(Item::of_tier(GearTier::new(6), GearSlot::Weapon));
        assert_eq!(c.effective_attack(), 50_040);
        c.unequip(GearSlot::Weapon);
        assert_eq!(c.effective_attack(), 40);
    }
}

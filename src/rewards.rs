//! Reward resolution shared by the arena and survival loops.

use crate::character::{add_currency, add_experience, Character, LevelUpReport};
use crate::core::constants::*;
use crate::items::{GearSlot, GearTier, Inventory, Item};
use serde::{Deserialize, Serialize};

/// Experience, currency and gear for one victory or kill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub experience: u64,
    pub currency: u64,
    pub drops: Vec<Item>,
}

/// Arena victory reward.
///
/// Experience is `100 * stage * world`, currency is a flat 250, and
/// `drop_count` pieces of tier `min(6, world)` alternate weapon/armor.
pub fn resolve_victory(stage: u32, world: u32, drop_count: u32) -> Reward {
    let tier = GearTier::for_world(world);
    let drops = (0..drop_count.min(VICTORY_MAX_DROPS))
        .map(|i| Item::of_tier(tier, GearSlot::for_drop_index(i)))
        .collect();

    Reward {
        experience: VICTORY_XP_BASE * stage as u64 * world as u64,
        currency: VICTORY_CURRENCY,
        drops,
    }
}

/// Survival kill reward. Elites pay five times a normal kill.
pub fn resolve_kill(is_elite: bool) -> Reward {
    let multiplier = if is_elite { ELITE_REWARD_MULTIPLIER } else { 1 };
    Reward {
        experience: KILL_XP * multiplier,
        currency: KILL_CURRENCY * multiplier,
        drops: Vec::new(),
    }
}

/// Folds a reward into the character and inventory.
///
/// Experience goes last so level-ups, and the HP refill they bring, are
/// fully resolved before this returns.
pub fn grant(
    reward: &Reward,
    character: &mut Character,
    inventory: &mut impl Inventory,
) -> LevelUpReport {
    add_currency(character, reward.currency);
    for item in &reward.drops {
        inventory.add_item(item.clone());
    }
    add_experience(character, reward.experience)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Stash;

    #[test]
    fn test_victory_experience_scales_with_stage_and_world() {
        assert_eq!(resolve_victory(1, 1, 0).experience, 100);
        assert_eq!(resolve_victory(7, 3, 0).experience, 2100);
        assert_eq!(resolve_victory(20, 1, 0).currency, 250);
    }

    #[test]
    fn test_victory_drops_alternate_and_use_world_tier() {
        let reward = resolve_victory(5, 2, 3);
        assert_eq!(reward.drops.len(), 3);
        assert_eq!(reward.drops[0].slot, GearSlot::Weapon);
        assert_eq!(reward.drops[1].slot, GearSlot::Armor);
        assert_eq!(reward.drops[2].slot, GearSlot::Weapon);
        assert!(reward.drops.iter().all(|d| d.power == 1500));
    }

    #[test]
    fn test_drop_tier_caps_at_six() {
        let reward = resolve_victory(1, 12, 1);
        assert_eq!(reward.drops[0].tier.value(), 6);
        assert_eq!(reward.drops[0].power, 50_000);
    }

    #[test]
    fn test_drop_count_capped() {
        assert_eq!(resolve_victory(1, 1, 9).drops.len(), 3);
    }

    #[test]
    fn test_kill_rewards() {
        let normal = resolve_kill(false);
        let elite = resolve_kill(true);
        assert_eq!((normal.currency, normal.experience), (100, 50));
        assert_eq!((elite.currency, elite.experience), (500, 250));
    }

    #[test]
    fn test_grant_resolves_levels_before_returning() {
        let mut character = Character::new();
        let mut stash = Stash::new();
        character.take_damage(200.0);

        let report = grant(&resolve_victory(3, 1, 2), &mut character, &mut stash);

        // 300 xp pays for 100 + 130, leaving 70 toward 169
        assert_eq!(report.levels_gained, 2);
        assert_eq!(character.experience, 70);
        assert_eq!(character.currency, 750);
        assert_eq!(stash.total_items(), 2);
        assert_eq!(character.current_hp, character.effective_max_hp() as f64);
    }

    #[test]
    fn test_repeated_kill_grants_accumulate_consistently() {
        let mut character = Character::new();
        let mut stash = Stash::new();
        for _ in 0..40 {
            grant(&resolve_kill(false), &mut character, &mut stash);
            assert!(character.experience < character.experience_to_next);
        }
        assert_eq!(character.currency, 500 + 40 * 100);
    }
}

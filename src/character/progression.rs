//! Progression ledger: experience, levels, ascension and currency.
//!
//! Every grant resolves all pending level-ups before it returns, so callers
//! never observe a character with `experience >= experience_to_next`.

use super::ranks::rank_name;
use super::types::Character;
use crate::core::constants::*;
use crate::core::error::{EngineError, Result};
use crate::items::{GearSlot, GearTier, Inventory, Item};
use rand::Rng;

/// Outcome of one experience grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub rank_before: u32,
    pub rank_after: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }

    pub fn ascended(&self) -> bool {
        self.rank_after > self.rank_before
    }

    /// Folds a later report into this one, keeping the earliest "before".
    pub fn merge(&mut self, later: LevelUpReport) {
        if !later.leveled_up() {
            return;
        }
        if !self.leveled_up() {
            *self = later;
            return;
        }
        self.levels_gained += later.levels_gained;
        self.level_after = later.level_after;
        self.rank_after = later.rank_after;
    }
}

/// Next threshold after a level-up: 1.3x, floored.
pub fn next_threshold(current: u64) -> u64 {
    current * XP_CURVE_NUMERATOR / XP_CURVE_DENOMINATOR
}

/// Adds experience and resolves every level-up it pays for.
///
/// Each level costs the current threshold, grows the threshold, grants
/// +250 max HP / +5 attack / +2 defense and refills HP. Reaching level 100
/// wraps to level 1 and raises the rank.
pub fn add_experience(character: &mut Character, amount: u64) -> LevelUpReport {
    let mut report = LevelUpReport {
        levels_gained: 0,
        level_before: character.level,
        level_after: character.level,
        rank_before: character.rank,
        rank_after: character.rank,
    };

    character.experience += amount;
    // A zero threshold from a hand-edited save would never stop levelling.
    character.experience_to_next = character.experience_to_next.max(1);

    while character.experience >= character.experience_to_next {
        character.experience -= character.experience_to_next;
        character.level += 1;
        character.experience_to_next = next_threshold(character.experience_to_next);

        character.base_max_hp += LEVEL_UP_HP;
        character.base_attack += LEVEL_UP_ATTACK;
        character.base_defense += LEVEL_UP_DEFENSE;

        if character.level >= ASCENSION_LEVEL {
            character.level = 1;
            character.rank += 1;
            log::info!("ascended to rank {}", rank_name(character.rank));
        }

        character.restore_hp();
        report.levels_gained += 1;
    }

    report.level_after = character.level;
    report.rank_after = character.rank;
    if report.leveled_up() {
        log::info!(
            "level {} -> {} (+{})",
            report.level_before,
            report.level_after,
            report.levels_gained
        );
    }
    report
}

pub fn add_currency(character: &mut Character, amount: u64) {
    character.currency += amount;
}

/// Tap training: `ceil(level / 2)` experience and one coin.
pub fn tap_train(character: &mut Character) -> LevelUpReport {
    let xp = character.level.div_ceil(2) as u64;
    add_currency(character, 1);
    add_experience(character, xp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainStat {
    Attack,
    Defense,
}

/// Spends 100 currency for +20 base attack or +10 base defense.
pub fn train(character: &mut Character, stat: TrainStat) -> Result<()> {
    if character.currency < TRAIN_COST {
        return Err(EngineError::InsufficientFunds {
            needed: TRAIN_COST,
            available: character.currency,
        });
    }
    character.currency -= TRAIN_COST;
    match stat {
        TrainStat::Attack => character.base_attack += TRAIN_ATTACK_GAIN,
        TrainStat::Defense => character.base_defense += TRAIN_DEFENSE_GAIN,
    }
    Ok(())
}

/// What a supply capsule contained.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyDrop {
    pub experience: u64,
    pub currency: u64,
    pub item: Option<Item>,
    pub level_up: LevelUpReport,
}

/// Milliseconds until the next capsule can be claimed, 0 when ready.
pub fn supply_remaining_ms(character: &Character, now_ms: i64) -> i64 {
    (SUPPLY_COOLDOWN_MS - (now_ms - character.last_supply_ms)).max(0)
}

/// Claims the periodic supply capsule.
///
/// Base value is `50 * level`; experience is the base scaled by 0.8..1.2,
/// currency is half the base, and 30% of capsules hold a tier-1 gear piece.
pub fn claim_supply(
    character: &mut Character,
    inventory: &mut impl Inventory,
    now_ms: i64,
    rng: &mut impl Rng,
) -> Result<SupplyDrop> {
    let remaining_ms = supply_remaining_ms(character, now_ms);
    if remaining_ms > 0 {
        return Err(EngineError::SupplyCooldown { remaining_ms });
    }
    character.last_supply_ms = now_ms;

    let base = SUPPLY_XP_PER_LEVEL * character.level.max(1) as u64;
    let variance = rng.gen_range(SUPPLY_XP_VARIANCE_MIN..SUPPLY_XP_VARIANCE_MAX);
    let experience = (base as f64 * variance).floor() as u64;
    let currency = (base as f64 * SUPPLY_CURRENCY_FACTOR).floor() as u64;

    let item = if rng.gen_bool(SUPPLY_GEAR_CHANCE) {
        let slot = if rng.gen_bool(0.5) {
            GearSlot::Weapon
        } else {
            GearSlot::Armor
        };
        let mut item = Item::of_tier(GearTier::BASIC, slot);
        item.name = "Capsule Gear".to_string();
        log::debug!("supply capsule held {}", item);
        inventory.add_item(item.clone());
        Some(item)
    } else {
        None
    };

    add_currency(character, currency);
    let level_up = add_experience(character, experience);

    Ok(SupplyDrop {
        experience,
        currency,
        item,
        level_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Stash;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_threshold_growth_is_floored() {
        assert_eq!(next_threshold(100), 130);
        assert_eq!(next_threshold(130), 169);
        assert_eq!(next_threshold(169), 219);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut c = Character::new();
        let report = add_experience(&mut c, 99);
        assert!(!report.leveled_up());
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 99);
    }

    #[test]
    fn test_single_level_up_grants_stats_and_refills() {
        let mut c = Character::new();
        c.take_damage(300.0);
        let report = add_experience(&mut c, 100);

        assert_eq!(report.levels_gained, 1);
        assert_eq!((report.level_before, report.level_after), (1, 2));
        assert_eq!(c.experience, 0);
        assert_eq!(c.experience_to_next, 130);
        assert_eq!(c.base_max_hp, 750);
        assert_eq!(c.base_attack, 45);
        assert_eq!(c.base_defense, 27);
        assert_eq!(c.current_hp, 750.0);
    }

    #[test]
    fn test_multi_level_jump_resolves_in_one_call() {
        let mut c = Character::new();
        // 100 + 130 + 169 = 399 pays for exactly three levels
        let report = add_experience(&mut c, 399 + 50);
        assert_eq!(report.levels_gained, 3);
        assert_eq!(c.level, 4);
        assert_eq!(c.experience, 50);
        assert_eq!(c.experience_to_next, 219);
        assert!(c.experience < c.experience_to_next);
    }

    #[test]
    fn test_three_and_a_half_thresholds_leaves_no_pending_level() {
        let mut c = Character::new();
        let report = add_experience(&mut c, 350);
        // 350 covers 100 + 130, the third level would need 169 more
        assert_eq!(report.levels_gained, 2);
        assert_eq!(c.experience, 120);
        assert!(c.experience < c.experience_to_next);
    }

    #[test]
    fn test_level_hundred_wraps_into_rank() {
        let mut c = Character::new();
        c.level = 99;
        c.experience_to_next = 10;
        let report = add_experience(&mut c, 10);

        assert_eq!(c.level, 1);
        assert_eq!(c.rank, 1);
        assert!(report.ascended());
        assert_eq!(report.level_after, 1);
        assert_eq!(c.current_hp, c.effective_max_hp() as f64);
    }

    #[test]
    fn test_zero_threshold_terminates() {
        let mut c = Character::new();
        c.experience_to_next = 0;
        let report = add_experience(&mut c, 5);
        assert_eq!(report.levels_gained, 5);
        assert_eq!(c.level, 6);
        assert_eq!(c.experience, 0);
        assert_eq!(c.experience_to_next, 1);
    }

    #[test]
    fn test_report_merge() {
        let mut total = LevelUpReport::default();
        total.merge(LevelUpReport {
            levels_gained: 1,
            level_before: 3,
            level_after: 4,
            rank_before: 0,
            rank_after: 0,
        });
        total.merge(LevelUpReport::default());
        total.merge(LevelUpReport {
            levels_gained: 2,
            level_before: 4,
            level_after: 6,
            rank_before: 0,
            rank_after: 0,
        });
        assert_eq!(total.levels_gained, 3);
        assert_eq!(total.level_before, 3);
        assert_eq!(total.level_after, 6);
    }

    #[test]
    fn test_tap_train() {
        let mut c = Character::new();
        c.level = 5;
        tap_train(&mut c);
        assert_eq!(c.experience, 3);
        assert_eq!(c.currency, 501);
    }

    #[test]
    fn test_train_spends_currency() {
        let mut c = Character::new();
        train(&mut c, TrainStat::Attack).unwrap();
        train(&mut c, TrainStat::Defense).unwrap();
        assert_eq!(c.base_attack, 60);
        assert_eq!(c.base_defense, 35);
        assert_eq!(c.currency, 300);
    }

    #[test]
    fn test_train_rejects_when_broke() {
        let mut c = Character::new();
        c.currency = 99;
        let err = train(&mut c, TrainStat::Attack).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientFunds {
                needed: 100,
                available: 99
            }
        ));
        assert_eq!(c.base_attack, 40);
        assert_eq!(c.currency, 99);
    }

    #[test]
    fn test_supply_capsule_and_cooldown() {
        let mut c = Character::new();
        let mut stash = Stash::new();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let now = 10_000_000;

        let drop = claim_supply(&mut c, &mut stash, now, &mut rng).unwrap();
        assert!((40..60).contains(&drop.experience));
        assert_eq!(drop.currency, 25);
        assert_eq!(c.currency, 525);
        assert_eq!(stash.total_items(), drop.item.iter().count() as u32);

        let err = claim_supply(&mut c, &mut stash, now + 1_000, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SupplyCooldown {
                remaining_ms: 59_000
            }
        ));

        assert!(claim_supply(&mut c, &mut stash, now + 60_000, &mut rng).is_ok());
    }
}

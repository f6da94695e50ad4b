//! Random draws used by the arena.
//!
//! Any `rand::Rng` works as a roll source. Tests that need exact numbers use
//! [`FixedRolls`] instead.

use super::constants::{
    AMBUSH_CHANCE, STRIKE_FACTOR_MAX, STRIKE_FACTOR_MIN, VICTORY_MAX_DROPS,
};
use rand::Rng;

/// Source of the stochastic parts of arena combat.
pub trait CombatRolls {
    /// Strike damage factor, drawn from `[0.7, 1.3)`.
    fn damage_factor(&mut self) -> f64;

    /// Whether a strike becomes an ambush. Rolled independently of the factor.
    fn ambush(&mut self) -> bool;

    /// Number of equipment drops for a victory, `0..=3`.
    fn drop_count(&mut self) -> u32;
}

impl<R: Rng> CombatRolls for R {
    fn damage_factor(&mut self) -> f64 {
        self.gen_range(STRIKE_FACTOR_MIN..STRIKE_FACTOR_MAX)
    }

    fn ambush(&mut self) -> bool {
        self.gen_bool(AMBUSH_CHANCE)
    }

    fn drop_count(&mut self) -> u32 {
        self.gen_range(0..=VICTORY_MAX_DROPS)
    }
}

/// Deterministic rolls: always the same factor, ambush flag and drop count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRolls {
    pub factor: f64,
    pub ambush: bool,
    pub drops: u32,
}

impl FixedRolls {
    /// Exactly 1.0x damage, never ambush, no drops.
    pub fn neutral() -> Self {
        Self {
            factor: 1.0,
            ambush: false,
            drops: 0,
        }
    }
}

impl CombatRolls for FixedRolls {
    fn damage_factor(&mut self) -> f64 {
        self.factor
    }

    fn ambush(&mut self) -> bool {
        self.ambush
    }

    fn drop_count(&mut self) -> u32 {
        self.drops
    }
}

use super::derived_stats::DerivedStats;
use crate::core::constants::*;
use crate::items::{Equipment, GearSlot, Item};
use serde::{Deserialize, Serialize};

/// The single active character.
///
/// Only source fields are stored. Effective attack, defense and max HP are
/// recomputed through [`DerivedStats`] on every read.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` so older saves
/// still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub base_attack: u64,
    pub base_defense: u64,
    pub base_max_hp: u64,
    pub current_hp: f64,
    /// Ascension tier, gained every time level wraps past 99.
    pub rank: u32,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub currency: u64,
    /// Arena charge gauge, 0..=100.
    pub charge: f64,
    pub equipment: Equipment,
    /// Epoch millis of the last supply capsule claim.
    #[serde(default)]
    pub last_supply_ms: i64,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    pub fn new() -> Self {
        Self {
            base_attack: START_BASE_ATTACK,
            base_defense: START_BASE_DEFENSE,
            base_max_hp: START_BASE_MAX_HP,
            current_hp: START_BASE_MAX_HP as f64,
            rank: 0,
            level: START_LEVEL,
            experience: 0,
            experience_to_next: START_XP_TO_NEXT,
            currency: START_CURRENCY,
            charge: 0.0,
            equipment: Equipment::new(),
            last_supply_ms: 0,
        }
    }

    pub fn stats(&self) -> DerivedStats {
        DerivedStats::calculate(self)
    }

    pub fn effective_attack(&self) -> u64 {
        self.stats().attack
    }

    pub fn effective_max_hp(&self) -> u64 {
        self.stats().max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn hp_fraction(&self) -> f64 {
        let max = self.effective_max_hp() as f64;
        if max <= 0.0 {
            0.0
        } else {
            (self.current_hp / max).clamp(0.0, 1.0)
        }
    }

    /// Subtracts damage, never dropping below zero.
    pub fn take_damage(&mut self, amount: f64) {
        self.current_hp = (self.current_hp - amount).max(0.0);
    }

    pub fn restore_hp(&mut self) {
        self.current_hp = self.effective_max_hp() as f64;
    }

    /// Re-applies the HP ceiling after gear or rank changes.
    pub fn clamp_hp(&mut self) {
        let max = self.effective_max_hp() as f64;
        self.current_hp = self.current_hp.clamp(0.0, max);
    }

    /// Adds charge, capped at 100. Returns the new value.
    pub fn add_charge(&mut self, amount: f64) -> f64 {
        self.charge = (self.charge + amount).clamp(0.0, MAX_CHARGE);
        self.charge
    }

    pub fn reset_charge(&mut self) {
        self.charge = 0.0;
    }

    pub fn charge_full(&self) -> bool {
        self.charge >= MAX_CHARGE
    }

    /// Wears `item` in its slot, returning the piece it replaced.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        let old = self.equipment.set(item.slot, Some(item));
        self.clamp_hp();
        old
    }

    pub fn unequip(&mut self, slot: GearSlot) -> Option<Item> {
        let old = self.equipment.set(slot, None);
        self.clamp_hp();
        old
    }
}

//! Tunable engine settings.
//!
//! Defaults mirror `core::constants`. Hosts may override any subset from
//! JSON; missing fields keep their defaults.

use super::constants::*;
use super::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Arena timing and charge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub player_period: f64,
    pub enemy_period: f64,
    pub ready_delay: f64,
    pub special_windup: f64,
    pub special_recovery: f64,
    pub victory_countdown: u32,
    pub defeat_countdown: u32,
    pub charge_per_tick: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_period: PLAYER_ACTION_PERIOD_SECONDS,
            enemy_period: ENEMY_ACTION_PERIOD_SECONDS,
            ready_delay: READY_DELAY_SECONDS,
            special_windup: SPECIAL_WINDUP_SECONDS,
            special_recovery: SPECIAL_RECOVERY_SECONDS,
            victory_countdown: VICTORY_COUNTDOWN_SECONDS,
            defeat_countdown: DEFEAT_COUNTDOWN_SECONDS,
            charge_per_tick: CHARGE_PER_PLAYER_TICK,
        }
    }
}

impl ArenaConfig {
    /// Periods must be positive, delays and charge non-negative, all finite.
    pub fn validate(&self) -> Result<()> {
        positive("arena.player_period", self.player_period)?;
        positive("arena.enemy_period", self.enemy_period)?;
        non_negative("arena.ready_delay", self.ready_delay)?;
        non_negative("arena.special_windup", self.special_windup)?;
        non_negative("arena.special_recovery", self.special_recovery)?;
        non_negative("arena.charge_per_tick", self.charge_per_tick)
    }
}

/// Survival-mode spawning, movement and loot settings. Distances are world
/// units, durations are frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    pub spawn_interval: u32,
    pub max_enemies: usize,
    pub elite_chance: f64,
    pub spawn_radius: f32,
    pub player_speed: f32,
    pub player_radius: f32,
    pub invincibility_frames: u32,
    pub charge_rate: f64,
    pub charge_jitter: f32,
    pub charging_hit_cap: f64,
    pub projectile_speed: f32,
    pub projectile_life: u32,
    pub projectile_radius: f32,
    pub magnet_radius: f32,
    pub pickup_radius: f32,
    pub loot_drag: f32,
    pub magnet_acceleration: f32,
    pub dodge_distance: f32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            max_enemies: MAX_LIVE_ENEMIES,
            elite_chance: ELITE_CHANCE,
            spawn_radius: SPAWN_RADIUS,
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            invincibility_frames: INVINCIBILITY_FRAMES,
            charge_rate: AREA_CHARGE_PER_FRAME,
            charge_jitter: CHARGE_JITTER,
            charging_hit_cap: CHARGING_HIT_CAP_FRACTION,
            projectile_speed: PROJECTILE_SPEED,
            projectile_life: PROJECTILE_LIFE_FRAMES,
            projectile_radius: PROJECTILE_RADIUS,
            magnet_radius: MAGNET_RADIUS,
            pickup_radius: PICKUP_RADIUS,
            loot_drag: LOOT_DRAG,
            magnet_acceleration: MAGNET_ACCELERATION,
            dodge_distance: DODGE_DISTANCE,
        }
    }
}

impl SurvivalConfig {
    /// Probabilities and fractions must lie in `0..=1`; distances, speeds
    /// and rates must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        unit("survival.elite_chance", self.elite_chance)?;
        unit("survival.charging_hit_cap", self.charging_hit_cap)?;
        unit("survival.loot_drag", self.loot_drag as f64)?;
        non_negative("survival.charge_rate", self.charge_rate)?;
        for (field, value) in [
            ("survival.spawn_radius", self.spawn_radius),
            ("survival.player_speed", self.player_speed),
            ("survival.player_radius", self.player_radius),
            ("survival.charge_jitter", self.charge_jitter),
            ("survival.projectile_speed", self.projectile_speed),
            ("survival.projectile_radius", self.projectile_radius),
            ("survival.magnet_radius", self.magnet_radius),
            ("survival.pickup_radius", self.pickup_radius),
            ("survival.magnet_acceleration", self.magnet_acceleration),
            ("survival.dodge_distance", self.dodge_distance),
        ] {
            non_negative(field, value as f64)?;
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{field} must be finite and >= 0, got {value}"
        )))
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{field} must be finite and > 0, got {value}"
        )))
    }
}

fn unit(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{field} must be within 0..=1, got {value}"
        )))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub arena: ArenaConfig,
    pub survival: SurvivalConfig,
}

impl EngineConfig {
    /// Parses overrides and rejects values the loops cannot run with.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.arena.validate()?;
        self.survival.validate()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.arena.player_period, 0.5);
        assert_eq!(config.arena.enemy_period, 0.8);
        assert_eq!(config.arena.victory_countdown, 3);
        assert_eq!(config.survival.max_enemies, 10);
        assert_eq!(config.survival.invincibility_frames, 30);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "arena": { "enemy_period": 1.2 } }"#).unwrap();
        assert_eq!(config.arena.enemy_period, 1.2);
        assert_eq!(config.arena.player_period, 0.5);
        assert_eq!(config.survival, SurvivalConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = EngineConfig::from_json("{ arena: ").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_elite_chance_above_one_rejected() {
        let err = EngineConfig::from_json(r#"{"survival":{"elite_chance":1.5}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(ref msg) if msg.contains("elite_chance")));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for json in [
            r#"{"survival":{"charging_hit_cap":-0.1}}"#,
            r#"{"survival":{"spawn_radius":-5.0}}"#,
            r#"{"survival":{"loot_drag":2.0}}"#,
            r#"{"arena":{"player_period":0.0}}"#,
            r#"{"arena":{"ready_delay":-1.0}}"#,
        ] {
            assert!(
                matches!(EngineConfig::from_json(json), Err(EngineError::InvalidConfig(_))),
                "{json} accepted"
            );
        }
    }

    #[test]
    fn test_boundary_probabilities_accepted() {
        let config =
            EngineConfig::from_json(r#"{"survival":{"elite_chance":1.0,"charging_hit_cap":0.0}}"#)
                .unwrap();
        assert_eq!(config.survival.elite_chance, 1.0);
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = EngineConfig::default();
        config.survival.elite_chance = 0.5;
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}

use crate::character::LevelUpReport;
use crate::core::constants::*;
use crate::identity::Identity;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Controls sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurvivalInput {
    /// Stick direction, magnitude up to 1.
    pub direction: Vec2,
    pub shoot: bool,
    pub dodge: bool,
    /// Held to charge the area ultimate; releasing at full charge fires it.
    pub charging: bool,
}

impl SurvivalInput {
    pub fn moving(direction: Vec2) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Whether the stick is outside the deadzone on either axis.
    pub fn has_direction(&self) -> bool {
        self.direction.x.abs() >= INPUT_DEADZONE || self.direction.y.abs() >= INPUT_DEADZONE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub identity: Identity,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: f64,
    pub max_hp: f64,
    /// Contact damage per hit.
    pub attack: f64,
    pub speed: f32,
    pub elite: bool,
}

impl Enemy {
    /// Builds an enemy scaled from the player's effective attack and max HP.
    pub fn scaled(
        identity: Identity,
        pos: Vec2,
        elite: bool,
        player_attack: u64,
        player_max_hp: u64,
    ) -> Self {
        let (radius, speed, hp_factor, contact_fraction) = if elite {
            ELITE_PROFILE
        } else {
            ENEMY_PROFILE
        };
        let scale_power = player_attack as f64 * ENEMY_SCALE_POWER_FACTOR;
        let max_hp = scale_power * hp_factor;
        Self {
            identity,
            pos,
            radius,
            hp: max_hp,
            max_hp,
            attack: player_max_hp as f64 * contact_fraction,
            speed,
            elite,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left before it fizzles.
    pub life: u32,
    pub damage: f64,
}

/// Cosmetic only. Moved and aged every frame, never collides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Currency,
    Experience,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: LootKind,
    pub value: u64,
}

/// Values the HUD shows every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalHud {
    pub hp_fraction: f64,
    pub kills: u32,
    pub charge_fraction: f64,
}

/// Render/audio intents emitted by a survival step.
#[derive(Debug, Clone, PartialEq)]
pub enum SurvivalEvent {
    EnemySpawned { elite: bool, identity: Identity },
    Shot { direction: Vec2 },
    Dodged { to: Vec2 },
    EnemyHit { damage: f64, remaining: f64 },
    PlayerHit { damage: f64, hp: f64 },
    EnemyKilled { elite: bool, pos: Vec2 },
    UltimateUnleashed { enemies: usize },
    LootCollected {
        kind: LootKind,
        value: u64,
        level_up: LevelUpReport,
    },
    Defeated { kills: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_scaling() {
        let normal = Enemy::scaled(Identity::placeholder(), Vec2::ZERO, false, 100, 1000);
        assert_eq!(normal.max_hp, 75.0);
        assert_eq!(normal.attack, 20.0);
        assert_eq!(normal.speed, 5.0);
        assert_eq!(normal.radius, 30.0);

        let elite = Enemy::scaled(Identity::placeholder(), Vec2::ZERO, true, 100, 1000);
        assert_eq!(elite.max_hp, 400.0);
        assert_eq!(elite.attack, 80.0);
        assert_eq!(elite.speed, 3.0);
        assert_eq!(elite.radius, 50.0);
    }

    #[test]
    fn test_deadzone() {
        assert!(!SurvivalInput::moving(Vec2::new(0.05, -0.05)).has_direction());
        assert!(SurvivalInput::moving(Vec2::new(0.0, -0.5)).has_direction());
    }
}

use crate::character::LevelUpReport;
use crate::core::constants::*;
use crate::identity::Identity;
use crate::rewards::Reward;
use serde::{Deserialize, Serialize};

/// Persistent arena position: what the stage map shows and saves carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaProgress {
    pub world: u32,
    pub stage: u32,
    /// Highest unlocked stage in the current world.
    pub max_stage: u32,
}

impl Default for ArenaProgress {
    fn default() -> Self {
        Self {
            world: 1,
            stage: 1,
            max_stage: 1,
        }
    }
}

impl ArenaProgress {
    /// Moves past a cleared stage.
    ///
    /// Clearing the frontier unlocks the next stage, clearing stage 20 rolls
    /// into a fresh world, and replaying an earlier stage steps forward
    /// without touching the frontier.
    pub fn advance(&mut self) {
        if self.stage == self.max_stage && self.max_stage < STAGES_PER_WORLD {
            self.max_stage += 1;
            self.stage += 1;
        } else if self.stage == STAGES_PER_WORLD {
            self.world += 1;
            self.stage = 1;
            self.max_stage = 1;
            log::info!("entered world {}", self.world);
        } else if self.stage < self.max_stage {
            self.stage += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    Idle,
    Preparing,
    Fighting,
    Won,
    Defeated,
}

/// Multiplier applied to a guardian's base stats: `1.8^stage * 25^(world-1)`.
pub fn guardian_scale(stage: u32, world: u32) -> f64 {
    GUARDIAN_STAGE_GROWTH.powi(stage as i32)
        * GUARDIAN_WORLD_GROWTH.powi(world.saturating_sub(1) as i32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    pub identity: Identity,
    pub max_hp: f64,
    pub current_hp: f64,
    pub attack: f64,
}

impl Guardian {
    pub fn new(stage: u32, world: u32, identity: Identity) -> Self {
        let scale = guardian_scale(stage, world);
        let max_hp = GUARDIAN_BASE_HP * scale;
        Self {
            identity,
            max_hp,
            current_hp: max_hp,
            attack: GUARDIAN_BASE_ATTACK * scale,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    /// HP may go negative; only the sign matters for resolution.
    pub fn take_damage(&mut self, amount: f64) {
        self.current_hp -= amount;
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.current_hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}

/// Which countdown is running after a battle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTarget {
    NextStage,
    Restart,
}

/// Render/audio intents emitted by the arena. `generation` identifies the
/// battle an event belongs to, so presenters can drop stale ones.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    BattlePrepared {
        generation: u64,
        progress: ArenaProgress,
        guardian: Identity,
        backdrop: Option<String>,
    },
    FightStarted {
        generation: u64,
    },
    PlayerStrike {
        generation: u64,
        damage: f64,
        ambush: bool,
        charge: f64,
        guardian_hp: f64,
    },
    EnemyStrike {
        generation: u64,
        damage: f64,
        ambush: bool,
        player_hp: f64,
    },
    SpecialStarted {
        generation: u64,
    },
    SpecialImpact {
        generation: u64,
        damage: f64,
        guardian_hp: f64,
    },
    CinematicEnded {
        generation: u64,
    },
    Victory {
        generation: u64,
        stage: u32,
        world: u32,
        reward: Reward,
        level_up: LevelUpReport,
    },
    Defeat {
        generation: u64,
        stage: u32,
        world: u32,
    },
    Countdown {
        generation: u64,
        target: CountdownTarget,
        remaining: u32,
    },
    Exited {
        generation: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(stage: u32, max_stage: u32) -> ArenaProgress {
        ArenaProgress {
            world: 1,
            stage,
            max_stage,
        }
    }

    #[test]
    fn test_guardian_formula_all_stages() {
        for world in 1..=3 {
            for stage in 1..=STAGES_PER_WORLD {
                let g = Guardian::new(stage, world, Identity::placeholder());
                let scale = 1.8f64.powi(stage as i32) * 25f64.powi(world as i32 - 1);
                assert!((g.max_hp - 250.0 * scale).abs() <= 1e-9 * g.max_hp);
                assert!((g.attack - 30.0 * scale).abs() <= 1e-9 * g.attack);
                assert_eq!(g.current_hp, g.max_hp);
            }
        }
    }

    #[test]
    fn test_stage_one_guardian() {
        let g = Guardian::new(1, 1, Identity::placeholder());
        assert!((g.max_hp - 450.0).abs() < 1e-9);
        assert!((g.attack - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_clearing_frontier_unlocks_next() {
        let mut p = progress(4, 4);
        p.advance();
        assert_eq!((p.stage, p.max_stage, p.world), (5, 5, 1));
    }

    #[test]
    fn test_clearing_earlier_stage_keeps_frontier() {
        let mut p = progress(2, 9);
        p.advance();
        assert_eq!((p.stage, p.max_stage, p.world), (3, 9, 1));
    }

    #[test]
    fn test_clearing_stage_twenty_rolls_world() {
        let mut p = ArenaProgress {
            world: 3,
            stage: 20,
            max_stage: 20,
        };
        p.advance();
        assert_eq!((p.stage, p.max_stage, p.world), (1, 1, 4));
    }
}

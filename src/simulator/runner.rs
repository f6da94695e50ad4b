//! Simulation runner driving real game sessions.
//!
//! Every campaign and survival run goes through `GameSession`, so the numbers
//! come from the same arena and survival code the game uses. Statistics are
//! tracked externally from the emitted events.

use super::config::SimConfig;
use super::report::{CampaignStats, SimReport, SurvivalStats};
use crate::arena::ArenaEvent;
use crate::identity::Roster;
use crate::session::{GameSession, Mode};
use crate::survival::{SurvivalEvent, SurvivalInput, SurvivalSession};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut campaigns = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = rng_for(config, run_idx as u64);
        let stats = simulate_campaign(config, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Campaign {}/{} - World {}.{}, Level {}, Cleared {}, Defeats {}",
                run_idx + 1,
                config.num_runs,
                stats.final_world,
                stats.final_stage,
                stats.final_level,
                stats.stages_cleared,
                stats.defeats
            );
        }
        campaigns.push(stats);
    }

    let mut survivals = Vec::with_capacity(config.survival_runs as usize);
    for run_idx in 0..config.survival_runs {
        // Offset so survival seeds never collide with campaign seeds.
        let mut rng = rng_for(config, u32::MAX as u64 + run_idx as u64);
        let stats = simulate_survival(config, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Survival {}/{} - Kills {}, Frames {}, Ultimates {}",
                run_idx + 1,
                config.survival_runs,
                stats.kills,
                stats.frames,
                stats.ultimates
            );
        }
        survivals.push(stats);
    }

    SimReport::from_runs(campaigns, survivals, config.arena_seconds)
}

fn rng_for(config: &SimConfig, offset: u64) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(offset)),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn bump(counts: &mut Vec<u64>, world: u32) {
    let index = world as usize;
    if counts.len() <= index {
        counts.resize(index + 1, 0);
    }
    counts[index] += 1;
}

/// Runs one idle arena campaign for the configured time budget.
///
/// Nobody touches the controls: victories roll into the next stage and
/// defeats restart the world through the arena's own countdowns.
pub fn simulate_campaign(config: &SimConfig, rng: &mut ChaCha8Rng) -> CampaignStats {
    let mut session = GameSession::new(config.engine.clone(), Roster::default());
    let mut stats = CampaignStats::default();

    session.enter_arena();
    for _ in 0..config.arena_ticks() {
        let Ok(events) = session.tick_arena(config.tick_seconds, rng) else {
            break;
        };
        for event in events {
            match event {
                ArenaEvent::Victory { world, reward, .. } => {
                    stats.stages_cleared += 1;
                    stats.items_dropped += reward.drops.len() as u64;
                    bump(&mut stats.world_clears, world);
                }
                ArenaEvent::Defeat { world, .. } => {
                    stats.defeats += 1;
                    bump(&mut stats.world_defeats, world);
                }
                ArenaEvent::SpecialStarted { .. } => stats.specials += 1,
                _ => {}
            }
        }
    }
    session.return_to_menu();

    let progress = session.arena_progress();
    stats.final_world = progress.world;
    stats.final_stage = progress.stage;
    stats.final_level = session.character.level;
    stats.final_rank = session.character.rank;
    stats
}

/// Scripted survival input: strafes in a slow circle, shoots on a fixed
/// cadence, dodges after being hit and charges the ultimate once a crowd
/// builds up.
#[derive(Debug, Clone)]
pub struct Pilot {
    pub shoot_every: u64,
    /// Live enemies needed before the pilot starts charging.
    pub crowd: usize,
    /// Radians turned per frame while strafing.
    pub turn_rate: f32,
    frame: u64,
    was_hit: bool,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            shoot_every: 6,
            crowd: 5,
            turn_rate: 0.02,
            frame: 0,
            was_hit: false,
        }
    }
}

impl Pilot {
    /// Picks the input for the next frame from the visible session state.
    pub fn next_input(&mut self, session: &SurvivalSession) -> SurvivalInput {
        self.frame += 1;

        if session.charging {
            // Keep holding until the meter is full; releasing fires it.
            return SurvivalInput {
                charging: session.hud().charge_fraction < 1.0,
                ..SurvivalInput::default()
            };
        }
        if session.enemies.len() >= self.crowd {
            return SurvivalInput {
                charging: true,
                ..SurvivalInput::default()
            };
        }

        let shoot = self.frame % self.shoot_every.max(1) == 0;
        // Stand still on shooting frames so the shot auto-aims.
        let direction = if shoot {
            Vec2::ZERO
        } else {
            Vec2::from_angle(self.frame as f32 * self.turn_rate)
        };
        let dodge = std::mem::take(&mut self.was_hit) && !shoot;

        SurvivalInput {
            direction,
            shoot,
            dodge,
            charging: false,
        }
    }

    /// Feeds back the events of the frame just played.
    pub fn observe(&mut self, events: &[SurvivalEvent]) {
        if events
            .iter()
            .any(|e| matches!(e, SurvivalEvent::PlayerHit { .. }))
        {
            self.was_hit = true;
        }
    }
}

/// Runs one survival session under the scripted [`Pilot`] until defeat or
/// the frame limit.
pub fn simulate_survival(config: &SimConfig, rng: &mut ChaCha8Rng) -> SurvivalStats {
    let mut session = GameSession::new(config.engine.clone(), Roster::default());
    let mut pilot = Pilot::default();
    let mut stats = SurvivalStats::default();

    session.enter_survival();
    while stats.frames < config.max_frames {
        let input = match session.mode() {
            Mode::Survival(run) => pilot.next_input(run),
            _ => break,
        };
        let Ok(events) = session.step_survival(&input, rng) else {
            break;
        };
        stats.frames += 1;
        pilot.observe(&events);

        for event in &events {
            match event {
                SurvivalEvent::EnemyKilled { elite, .. } => {
                    stats.kills += 1;
                    if *elite {
                        stats.elite_kills += 1;
                    }
                }
                SurvivalEvent::UltimateUnleashed { .. } => stats.ultimates += 1,
                SurvivalEvent::PlayerHit { .. } => stats.hits_taken += 1,
                SurvivalEvent::LootCollected { level_up, .. } => {
                    stats.levels_gained += level_up.levels_gained;
                }
                _ => {}
            }
        }
    }

    stats.survived = matches!(session.mode(), Mode::Survival(_));
    session.return_to_menu();
    stats
}

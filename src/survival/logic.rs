//! Frame-stepped survival loop.
//!
//! One call to [`SurvivalSession::step`] runs a whole frame to completion.
//! Units are world units and frames; nothing here reads a wall clock.

use super::types::*;
use crate::character::{add_currency, add_experience, Character, LevelUpReport};
use crate::core::config::SurvivalConfig;
use crate::core::constants::*;
use crate::identity::Roster;
use crate::rewards::resolve_kill;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct SurvivalSession {
    /// Checked at the top of every step. Cleared on defeat or [`stop`](Self::stop).
    pub running: bool,
    pub player_pos: Vec2,
    /// Recentered on the player every frame.
    pub camera: Vec2,
    /// Last non-neutral stick direction, unit length.
    pub facing: Vec2,
    pub player_hp: f64,
    pub player_max_hp: f64,
    pub invincible: u32,
    pub charging: bool,
    pub charge: f64,
    pub kills: u32,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub loot: Vec<Loot>,
    pub frame: u64,
    spawn_timer: u32,
    config: SurvivalConfig,
    roster: Roster,
}

impl SurvivalSession {
    /// Fresh session at the origin with the character's full HP.
    pub fn new(character: &Character, config: SurvivalConfig, roster: Roster) -> Self {
        let max_hp = character.effective_max_hp() as f64;
        Self {
            running: true,
            player_pos: Vec2::ZERO,
            camera: Vec2::ZERO,
            facing: Vec2::X,
            player_hp: max_hp,
            player_max_hp: max_hp,
            invincible: 0,
            charging: false,
            charge: 0.0,
            kills: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            loot: Vec::new(),
            frame: 0,
            spawn_timer: 0,
            config,
            roster,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn hud(&self) -> SurvivalHud {
        let hp_fraction = if self.player_max_hp > 0.0 {
            (self.player_hp / self.player_max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SurvivalHud {
            hp_fraction,
            kills: self.kills,
            charge_fraction: self.charge / MAX_CHARGE,
        }
    }

    /// Runs one frame.
    pub fn step(
        &mut self,
        input: &SurvivalInput,
        character: &mut Character,
        rng: &mut impl Rng,
    ) -> Vec<SurvivalEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        self.frame += 1;

        self.update_player(input, character, rng, &mut events);
        self.camera = self.player_pos;
        self.spawn_enemies(character, rng, &mut events);
        self.advance_projectiles();
        self.move_enemies();
        self.resolve_projectile_hits(rng, &mut events);
        self.resolve_contact_damage(&mut events);
        self.remove_dead_enemies(rng, &mut events);
        self.update_loot(character, &mut events);
        self.update_particles();

        self.invincible = self.invincible.saturating_sub(1);

        if self.player_hp <= 0.0 {
            self.running = false;
            log::info!(
                "survival run ended after {} frames with {} kills",
                self.frame,
                self.kills
            );
            events.push(SurvivalEvent::Defeated { kills: self.kills });
        }

        events
    }

    fn update_player(
        &mut self,
        input: &SurvivalInput,
        character: &Character,
        rng: &mut impl Rng,
        events: &mut Vec<SurvivalEvent>,
    ) {
        if input.charging {
            self.charging = true;
            self.charge = (self.charge + self.config.charge_rate).min(MAX_CHARGE);
            let jitter = self.config.charge_jitter;
            self.player_pos += Vec2::new(
                (rng.gen::<f32>() - 0.5) * jitter,
                (rng.gen::<f32>() - 0.5) * jitter,
            );
            return;
        }

        if self.charging {
            self.charging = false;
            if self.charge >= MAX_CHARGE {
                self.unleash_ultimate(rng, events);
            }
            self.charge = 0.0;
        }

        if input.has_direction() {
            let direction = input.direction.clamp_length_max(1.0);
            self.player_pos += direction * self.config.player_speed;
            self.facing = direction.normalize_or(self.facing);
        }

        if input.shoot {
            self.shoot(input, character, events);
        }
        if input.dodge {
            self.dodge(input, rng, events);
        }
    }

    /// Fires toward the stick, else the nearest enemy, else the facing.
    fn shoot(
        &mut self,
        input: &SurvivalInput,
        character: &Character,
        events: &mut Vec<SurvivalEvent>,
    ) {
        let direction = if input.has_direction() {
            input.direction.normalize_or(self.facing)
        } else if let Some(target) = self.nearest_enemy() {
            (target - self.player_pos).normalize_or(self.facing)
        } else {
            self.facing
        };
        self.facing = direction;

        self.projectiles.push(Projectile {
            pos: self.player_pos,
            vel: direction * self.config.projectile_speed,
            life: self.config.projectile_life,
            damage: character.effective_attack() as f64,
        });
        events.push(SurvivalEvent::Shot { direction });
    }

    fn nearest_enemy(&self) -> Option<Vec2> {
        self.enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(self.player_pos)
                    .total_cmp(&b.distance_squared(self.player_pos))
            })
    }

    fn dodge(
        &mut self,
        input: &SurvivalInput,
        rng: &mut impl Rng,
        events: &mut Vec<SurvivalEvent>,
    ) {
        let direction = if input.has_direction() {
            input.direction.normalize_or(self.facing)
        } else {
            self.facing
        };
        self.player_pos += direction * self.config.dodge_distance;
        for _ in 0..DODGE_PARTICLE_COUNT {
            self.burst(self.player_pos, 12.0, DODGE_PARTICLE_LIFE, rng);
        }
        events.push(SurvivalEvent::Dodged {
            to: self.player_pos,
        });
    }

    /// Zeroes every live enemy. Their loot drops in the death pass.
    fn unleash_ultimate(&mut self, rng: &mut impl Rng, events: &mut Vec<SurvivalEvent>) {
        let positions: Vec<Vec2> = self.enemies.iter().map(|e| e.pos).collect();
        for enemy in &mut self.enemies {
            enemy.hp = 0.0;
        }
        for pos in &positions {
            for _ in 0..BURST_PARTICLE_COUNT {
                self.burst(*pos, 25.0, BURST_PARTICLE_LIFE, rng);
            }
        }
        events.push(SurvivalEvent::UltimateUnleashed {
            enemies: positions.len(),
        });
    }

    fn spawn_enemies(
        &mut self,
        character: &Character,
        rng: &mut impl Rng,
        events: &mut Vec<SurvivalEvent>,
    ) {
        self.spawn_timer += 1;
        if self.spawn_timer < self.config.spawn_interval {
            return;
        }
        self.spawn_timer = 0;
        if self.enemies.len() >= self.config.max_enemies {
            return;
        }

        let angle = rng.gen_range(0.0..TAU);
        let pos = self.player_pos + Vec2::from_angle(angle) * self.config.spawn_radius;
        let elite = rng.gen_bool(self.config.elite_chance);
        let identity = self.roster.random_guardian(rng);
        let stats = character.stats();
        self.enemies.push(Enemy::scaled(
            identity.clone(),
            pos,
            elite,
            stats.attack,
            stats.max_hp,
        ));
        events.push(SurvivalEvent::EnemySpawned { elite, identity });
    }

    fn advance_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.pos += projectile.vel;
            projectile.life = projectile.life.saturating_sub(1);
        }
        self.projectiles.retain(|p| p.life > 0);
    }

    /// Pure pursuit toward the player's current position.
    fn move_enemies(&mut self) {
        let target = self.player_pos;
        for enemy in &mut self.enemies {
            let to_player = target - enemy.pos;
            if to_player.length() <= enemy.speed {
                enemy.pos = target;
            } else {
                enemy.pos += to_player.normalize_or_zero() * enemy.speed;
            }
        }
    }

    /// Each projectile hits at most one enemy, the first one it overlaps.
    fn resolve_projectile_hits(
        &mut self,
        rng: &mut impl Rng,
        events: &mut Vec<SurvivalEvent>,
    ) {
        let radius = self.config.projectile_radius;
        let mut hits = Vec::new();
        self.projectiles.retain(|projectile| {
            let target = self.enemies.iter_mut().find(|e| {
                e.is_alive() && projectile.pos.distance(e.pos) <= e.radius + radius
            });
            match target {
                Some(enemy) => {
                    enemy.hp -= projectile.damage;
                    hits.push((enemy.pos, projectile.damage, enemy.hp));
                    false
                }
                None => true,
            }
        });
        for (pos, damage, remaining) in hits {
            self.burst(pos, 5.0, HIT_PARTICLE_LIFE, rng);
            events.push(SurvivalEvent::EnemyHit { damage, remaining });
        }
    }

    fn resolve_contact_damage(&mut self, events: &mut Vec<SurvivalEvent>) {
        let reach = self.config.player_radius;
        for enemy in &self.enemies {
            if self.invincible > 0 {
                break;
            }
            if self.player_pos.distance(enemy.pos) > enemy.radius + reach {
                continue;
            }
            let damage = contact_damage(
                enemy.attack,
                self.charging,
                self.player_max_hp,
                self.config.charging_hit_cap,
            );
            self.player_hp = (self.player_hp - damage).max(0.0);
            self.invincible = self.config.invincibility_frames;
            events.push(SurvivalEvent::PlayerHit {
                damage,
                hp: self.player_hp,
            });
        }
    }

    fn remove_dead_enemies(&mut self, rng: &mut impl Rng, events: &mut Vec<SurvivalEvent>) {
        let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
            self.enemies.drain(..).partition(|e| !e.is_alive());
        self.enemies = alive;

        for enemy in dead {
            self.kills += 1;
            let reward = resolve_kill(enemy.elite);
            self.drop_loot(enemy.pos, LootKind::Currency, reward.currency, rng);
            self.drop_loot(enemy.pos, LootKind::Experience, reward.experience, rng);
            events.push(SurvivalEvent::EnemyKilled {
                elite: enemy.elite,
                pos: enemy.pos,
            });
        }
    }

    fn drop_loot(&mut self, pos: Vec2, kind: LootKind, value: u64, rng: &mut impl Rng) {
        let scatter = LOOT_SCATTER_SPEED;
        self.loot.push(Loot {
            pos,
            vel: Vec2::new(
                rng.gen_range(-scatter..scatter),
                rng.gen_range(-scatter..scatter),
            ),
            kind,
            value,
        });
    }

    /// Drag, magnet pull, then pickup. A collected orb is removed the same
    /// frame, so it pays out once.
    fn update_loot(&mut self, character: &mut Character, events: &mut Vec<SurvivalEvent>) {
        let player = self.player_pos;
        let config = &self.config;
        let mut collected = Vec::new();

        self.loot.retain_mut(|orb| {
            orb.vel *= config.loot_drag;
            let to_player = player - orb.pos;
            if to_player.length() <= config.magnet_radius {
                orb.vel += to_player.normalize_or_zero() * config.magnet_acceleration;
            }
            orb.pos += orb.vel;

            if orb.pos.distance(player) <= config.pickup_radius {
                collected.push((orb.kind, orb.value));
                false
            } else {
                true
            }
        });

        for (kind, value) in collected {
            let level_up = match kind {
                LootKind::Currency => {
                    add_currency(character, value);
                    LevelUpReport::default()
                }
                LootKind::Experience => add_experience(character, value),
            };
            if level_up.leveled_up() {
                self.player_max_hp = character.effective_max_hp() as f64;
                self.player_hp = self.player_max_hp;
            }
            events.push(SurvivalEvent::LootCollected {
                kind,
                value,
                level_up,
            });
        }
    }

    fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    fn burst(&mut self, pos: Vec2, spread: f32, life: u32, rng: &mut impl Rng) {
        self.particles.push(Particle {
            pos,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            ),
            life,
        });
    }
}

/// Contact damage for one hit. While charging it doubles, capped at a
/// fraction of max HP.
pub fn contact_damage(attack: f64, charging: bool, max_hp: f64, cap_fraction: f64) -> f64 {
    if charging {
        (attack * CHARGING_DAMAGE_MULTIPLIER).min(max_hp * cap_fraction)
    } else {
        attack
    }
}

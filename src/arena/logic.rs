//! Arena battle loop.
//!
//! Two repeating actions (player and enemy) run on a [`TimerWheel`] owned by
//! the battle. Every action checks the `active` and `cinematic` gates before
//! doing anything, and the first terminal condition clears `active` before
//! any follow-up runs, so a battle resolves exactly once.

use super::timer::{seconds_to_ms, TimerKind, TimerWheel};
use super::types::*;
use crate::character::Character;
use crate::core::config::ArenaConfig;
use crate::core::constants::*;
use crate::core::error::{EngineError, Result};
use crate::core::rolls::CombatRolls;
use crate::identity::Roster;
use crate::items::Inventory;
use crate::rewards::{grant, resolve_victory};

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Defeated,
}

/// Normal strike damage: `attack * factor`, times 1.2 on an ambush.
pub fn strike_damage(attack: f64, factor: f64, ambush: bool) -> f64 {
    let damage = attack * factor;
    if ambush {
        damage * AMBUSH_MULTIPLIER
    } else {
        damage
    }
}

/// Special attack damage: always exactly six times effective attack.
pub fn special_damage(character: &Character) -> f64 {
    (character.effective_attack() * SPECIAL_ATTACK_MULTIPLIER) as f64
}

#[derive(Debug, Clone)]
pub struct ArenaBattle {
    pub progress: ArenaProgress,
    pub phase: ArenaPhase,
    /// Cleared as the very first step of resolution.
    pub active: bool,
    /// Set while a special attack sequence is in flight.
    pub cinematic: bool,
    pub guardian: Option<Guardian>,
    pub generation: u64,
    countdown: Option<(CountdownTarget, u32)>,
    timers: TimerWheel,
    config: ArenaConfig,
    roster: Roster,
}

impl ArenaBattle {
    pub fn new(progress: ArenaProgress, config: ArenaConfig, roster: Roster) -> Self {
        Self {
            progress,
            phase: ArenaPhase::Idle,
            active: false,
            cinematic: false,
            guardian: None,
            generation: 0,
            countdown: None,
            timers: TimerWheel::new(),
            config,
            roster,
        }
    }

    pub fn countdown(&self) -> Option<(CountdownTarget, u32)> {
        self.countdown
    }

    /// Whether any timer is still pending. False once the arena is left.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Enters the arena at the current stage.
    pub fn start(&mut self) -> Vec<ArenaEvent> {
        self.prepare()
    }

    /// Jumps to an unlocked stage of the current world, abandoning whatever
    /// battle is in progress. Locked or out-of-range stages are rejected
    /// without touching any state.
    pub fn select_stage(&mut self, stage: u32) -> Result<Vec<ArenaEvent>> {
        if stage == 0 || stage > STAGES_PER_WORLD {
            log::warn!("rejected stage selection: {} out of range", stage);
            return Err(EngineError::InvalidStage(stage));
        }
        if stage > self.progress.max_stage {
            log::warn!(
                "rejected stage selection: {} locked (frontier {})",
                stage,
                self.progress.max_stage
            );
            return Err(EngineError::StageLocked {
                requested: stage,
                max_stage: self.progress.max_stage,
            });
        }
        self.progress.stage = stage;
        Ok(self.prepare())
    }

    /// Moves on after a victory without waiting for the countdown.
    pub fn advance(&mut self) -> Result<Vec<ArenaEvent>> {
        if self.phase != ArenaPhase::Won {
            return Err(EngineError::NotInMode("arena victory"));
        }
        self.progress.advance();
        log::debug!(
            "advanced to world {} stage {}",
            self.progress.world,
            self.progress.stage
        );
        Ok(self.prepare())
    }

    /// Full HP, empty gauge, back to stage 1 of the current world.
    pub fn restart(&mut self, player: &mut Character) -> Vec<ArenaEvent> {
        player.restore_hp();
        player.reset_charge();
        self.progress.stage = 1;
        self.prepare()
    }

    /// Leaves the arena. Every pending timer is dropped.
    pub fn exit(&mut self) -> Vec<ArenaEvent> {
        self.timers.cancel_all();
        self.active = false;
        self.cinematic = false;
        self.countdown = None;
        self.guardian = None;
        self.phase = ArenaPhase::Idle;
        vec![ArenaEvent::Exited {
            generation: self.generation,
        }]
    }

    fn prepare(&mut self) -> Vec<ArenaEvent> {
        self.timers.cancel_all();
        self.generation += 1;
        self.active = false;
        self.cinematic = false;
        self.countdown = None;

        let ArenaProgress { stage, world, .. } = self.progress;
        let identity = self.roster.guardian_for(stage, world);
        let guardian = Guardian::new(stage, world, identity.clone());
        log::debug!(
            "battle {} prepared: world {} stage {} guardian {} ({:.0} hp)",
            self.generation,
            world,
            stage,
            identity.name,
            guardian.max_hp
        );
        self.guardian = Some(guardian);
        self.phase = ArenaPhase::Preparing;
        self.timers
            .schedule_once(TimerKind::Ready, self.config.ready_delay);

        vec![ArenaEvent::BattlePrepared {
            generation: self.generation,
            progress: self.progress,
            guardian: identity,
            backdrop: self.roster.backdrop_for(world).map(str::to_string),
        }]
    }

    /// Advances the arena clock by `dt` seconds, firing every timer that
    /// falls due in order. A single call covers at most one hour; a
    /// non-finite `dt` is ignored.
    pub fn tick(
        &mut self,
        dt: f64,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
    ) -> Vec<ArenaEvent> {
        let mut events = Vec::new();
        if !dt.is_finite() {
            log::warn!("ignored arena tick with non-finite dt {}", dt);
            return events;
        }
        let step_ms = seconds_to_ms(dt.min(MAX_ARENA_STEP_SECONDS));
        let until = self.timers.now_ms().saturating_add(step_ms);

        while let Some(kind) = self.timers.pop_due(until) {
            match kind {
                TimerKind::Ready => self.on_ready(&mut events),
                TimerKind::PlayerAction => {
                    self.on_player_action(player, inventory, rolls, &mut events)
                }
                TimerKind::EnemyAction => {
                    self.on_enemy_action(player, inventory, rolls, &mut events)
                }
                TimerKind::SpecialImpact => {
                    self.on_special_impact(player, inventory, rolls, &mut events)
                }
                TimerKind::SpecialRecovery => self.end_cinematic(&mut events),
                TimerKind::Countdown => self.on_countdown(player, &mut events),
            }
        }
        self.timers.settle(until);

        events
    }

    fn on_ready(&mut self, events: &mut Vec<ArenaEvent>) {
        self.phase = ArenaPhase::Fighting;
        self.active = true;
        self.timers
            .schedule_repeating(TimerKind::PlayerAction, self.config.player_period);
        self.timers
            .schedule_repeating(TimerKind::EnemyAction, self.config.enemy_period);
        events.push(ArenaEvent::FightStarted {
            generation: self.generation,
        });
    }

    fn on_player_action(
        &mut self,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
        events: &mut Vec<ArenaEvent>,
    ) {
        if !self.active || self.cinematic {
            return;
        }
        let charge = player.add_charge(self.config.charge_per_tick);
        if player.charge_full() {
            self.begin_special(player, events);
            return;
        }

        let factor = rolls.damage_factor();
        let ambush = rolls.ambush();
        let damage = strike_damage(player.effective_attack() as f64, factor, ambush);
        let Some(guardian) = self.guardian.as_mut() else {
            return;
        };
        guardian.take_damage(damage);
        events.push(ArenaEvent::PlayerStrike {
            generation: self.generation,
            damage,
            ambush,
            charge,
            guardian_hp: guardian.current_hp,
        });
        self.check_resolution(player, inventory, rolls, events);
    }

    fn on_enemy_action(
        &mut self,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
        events: &mut Vec<ArenaEvent>,
    ) {
        if !self.active || self.cinematic {
            return;
        }
        let Some(attack) = self.guardian.as_ref().map(|g| g.attack) else {
            return;
        };
        let factor = rolls.damage_factor();
        let ambush = rolls.ambush();
        let damage = strike_damage(attack, factor, ambush);
        player.take_damage(damage);
        events.push(ArenaEvent::EnemyStrike {
            generation: self.generation,
            damage,
            ambush,
            player_hp: player.current_hp,
        });
        self.check_resolution(player, inventory, rolls, events);
    }

    fn begin_special(&mut self, player: &mut Character, events: &mut Vec<ArenaEvent>) {
        self.cinematic = true;
        player.reset_charge();
        self.timers
            .schedule_once(TimerKind::SpecialImpact, self.config.special_windup);
        events.push(ArenaEvent::SpecialStarted {
            generation: self.generation,
        });
    }

    fn on_special_impact(
        &mut self,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
        events: &mut Vec<ArenaEvent>,
    ) {
        if !self.active {
            self.end_cinematic(events);
            return;
        }
        let damage = special_damage(player);
        let Some(guardian) = self.guardian.as_mut() else {
            self.end_cinematic(events);
            return;
        };
        guardian.take_damage(damage);
        events.push(ArenaEvent::SpecialImpact {
            generation: self.generation,
            damage,
            guardian_hp: guardian.current_hp,
        });

        if self.check_resolution(player, inventory, rolls, events).is_none() {
            self.timers
                .schedule_once(TimerKind::SpecialRecovery, self.config.special_recovery);
        }
    }

    fn end_cinematic(&mut self, events: &mut Vec<ArenaEvent>) {
        if self.cinematic {
            self.cinematic = false;
            events.push(ArenaEvent::CinematicEnded {
                generation: self.generation,
            });
        }
    }

    /// Guardian first, then player. Whichever is checked first and is down
    /// decides the battle.
    fn check_resolution(
        &mut self,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
        events: &mut Vec<ArenaEvent>,
    ) -> Option<Outcome> {
        let guardian_down = self.guardian.as_ref().is_some_and(|g| !g.is_alive());
        if guardian_down {
            if self.try_conclude() {
                self.on_won(player, inventory, rolls, events);
                return Some(Outcome::Won);
            }
        } else if !player.is_alive() && self.try_conclude() {
            self.on_defeated(player, events);
            return Some(Outcome::Defeated);
        }
        None
    }

    /// Check-and-set on `active`. Only the first caller gets `true`.
    fn try_conclude(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.timers.cancel_all();
        true
    }

    fn on_won(
        &mut self,
        player: &mut Character,
        inventory: &mut impl Inventory,
        rolls: &mut impl CombatRolls,
        events: &mut Vec<ArenaEvent>,
    ) {
        self.end_cinematic(events);
        self.phase = ArenaPhase::Won;

        let ArenaProgress { stage, world, .. } = self.progress;
        let reward = resolve_victory(stage, world, rolls.drop_count());
        let level_up = grant(&reward, player, inventory);
        log::debug!(
            "battle {} won at world {} stage {} (+{} xp)",
            self.generation,
            world,
            stage,
            reward.experience
        );
        events.push(ArenaEvent::Victory {
            generation: self.generation,
            stage,
            world,
            reward,
            level_up,
        });
        self.begin_countdown(CountdownTarget::NextStage, self.config.victory_countdown, events);
    }

    fn on_defeated(&mut self, player: &mut Character, events: &mut Vec<ArenaEvent>) {
        self.end_cinematic(events);
        self.phase = ArenaPhase::Defeated;
        player.restore_hp();
        player.reset_charge();
        log::debug!(
            "battle {} lost at world {} stage {}",
            self.generation,
            self.progress.world,
            self.progress.stage
        );
        events.push(ArenaEvent::Defeat {
            generation: self.generation,
            stage: self.progress.stage,
            world: self.progress.world,
        });
        self.begin_countdown(CountdownTarget::Restart, self.config.defeat_countdown, events);
    }

    fn begin_countdown(
        &mut self,
        target: CountdownTarget,
        seconds: u32,
        events: &mut Vec<ArenaEvent>,
    ) {
        self.countdown = Some((target, seconds));
        self.timers
            .schedule_repeating(TimerKind::Countdown, COUNTDOWN_STEP_SECONDS);
        events.push(ArenaEvent::Countdown {
            generation: self.generation,
            target,
            remaining: seconds,
        });
    }

    fn on_countdown(&mut self, player: &mut Character, events: &mut Vec<ArenaEvent>) {
        let Some((target, remaining)) = self.countdown else {
            self.timers.cancel(TimerKind::Countdown);
            return;
        };
        let remaining = remaining.saturating_sub(1);
        self.countdown = Some((target, remaining));
        events.push(ArenaEvent::Countdown {
            generation: self.generation,
            target,
            remaining,
        });
        if remaining > 0 {
            return;
        }

        let follow_up = match target {
            CountdownTarget::NextStage => self.advance().unwrap_or_default(),
            CountdownTarget::Restart => self.restart(player),
        };
        events.extend(follow_up);
    }
}

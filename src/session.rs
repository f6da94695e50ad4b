//! The single owned game session.
//!
//! Holds the character, stash and arena progress, and switches between the
//! menu, the arena and survival. Entering a mode tears the previous one down
//! first, so no timer or entity from an old mode outlives the switch.

use crate::arena::{ArenaBattle, ArenaEvent, ArenaProgress};
use crate::character::{
    claim_supply, tap_train, train, Character, LevelUpReport, SaveData, SupplyDrop, TrainStat,
};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::rolls::CombatRolls;
use crate::identity::Roster;
use crate::items::{GearSlot, Stash};
use crate::survival::{SurvivalEvent, SurvivalHud, SurvivalInput, SurvivalSession};
use rand::Rng;

#[derive(Debug)]
pub enum Mode {
    Menu,
    Arena,
    Survival(Box<SurvivalSession>),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Arena => "arena",
            Mode::Survival(_) => "survival",
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    pub character: Character,
    pub stash: Stash,
    pub arena: ArenaBattle,
    mode: Mode,
    config: EngineConfig,
    roster: Roster,
}

impl GameSession {
    pub fn new(config: EngineConfig, roster: Roster) -> Self {
        Self::from_save(SaveData::default(), config, roster)
    }

    pub fn from_save(save: SaveData, config: EngineConfig, roster: Roster) -> Self {
        let arena = ArenaBattle::new(save.arena, config.arena.clone(), roster.clone());
        let mut character = save.character;
        character.clamp_hp();
        Self {
            character,
            stash: save.stash,
            arena,
            mode: Mode::Menu,
            config,
            roster,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Leaves whatever mode is active and returns to the menu.
    pub fn return_to_menu(&mut self) {
        match &mut self.mode {
            Mode::Arena => {
                self.arena.exit();
            }
            Mode::Survival(session) => session.stop(),
            Mode::Menu => {}
        }
        self.mode = Mode::Menu;
    }

    pub fn enter_arena(&mut self) -> Vec<ArenaEvent> {
        self.return_to_menu();
        self.mode = Mode::Arena;
        self.arena.start()
    }

    pub fn enter_survival(&mut self) {
        self.return_to_menu();
        let session = SurvivalSession::new(
            &self.character,
            self.config.survival.clone(),
            self.roster.clone(),
        );
        self.mode = Mode::Survival(Box::new(session));
    }

    fn require_arena(&self) -> Result<()> {
        match self.mode {
            Mode::Arena => Ok(()),
            _ => Err(EngineError::NotInMode("arena")),
        }
    }

    pub fn tick_arena(
        &mut self,
        dt: f64,
        rolls: &mut impl CombatRolls,
    ) -> Result<Vec<ArenaEvent>> {
        self.require_arena()?;
        Ok(self
            .arena
            .tick(dt, &mut self.character, &mut self.stash, rolls))
    }

    pub fn select_stage(&mut self, stage: u32) -> Result<Vec<ArenaEvent>> {
        self.require_arena()?;
        self.arena.select_stage(stage)
    }

    pub fn advance_stage(&mut self) -> Result<Vec<ArenaEvent>> {
        self.require_arena()?;
        self.arena.advance()
    }

    pub fn restart_arena(&mut self) -> Result<Vec<ArenaEvent>> {
        self.require_arena()?;
        Ok(self.arena.restart(&mut self.character))
    }

    /// Runs one survival frame. Defeat drops the session back to the menu.
    pub fn step_survival(
        &mut self,
        input: &SurvivalInput,
        rng: &mut impl Rng,
    ) -> Result<Vec<SurvivalEvent>> {
        let Mode::Survival(session) = &mut self.mode else {
            return Err(EngineError::NotInMode("survival"));
        };
        let events = session.step(input, &mut self.character, rng);
        if !session.running {
            self.mode = Mode::Menu;
        }
        Ok(events)
    }

    pub fn survival_hud(&self) -> Option<SurvivalHud> {
        match &self.mode {
            Mode::Survival(session) => Some(session.hud()),
            _ => None,
        }
    }

    pub fn tap_train(&mut self) -> LevelUpReport {
        tap_train(&mut self.character)
    }

    pub fn train(&mut self, stat: TrainStat) -> Result<()> {
        train(&mut self.character, stat)
    }

    pub fn claim_supply(&mut self, now_ms: i64, rng: &mut impl Rng) -> Result<SupplyDrop> {
        claim_supply(&mut self.character, &mut self.stash, now_ms, rng)
    }

    pub fn equip(&mut self, index: usize) -> Result<()> {
        self.stash.equip(index, &mut self.character)
    }

    pub fn unequip(&mut self, slot: GearSlot) -> Result<()> {
        self.stash.unequip(slot, &mut self.character)
    }

    pub fn arena_progress(&self) -> ArenaProgress {
        self.arena.progress
    }

    pub fn snapshot(&self) -> SaveData {
        SaveData {
            character: self.character.clone(),
            stash: self.stash.clone(),
            arena: self.arena.progress,
        }
    }

    /// Replaces the session's persistent state. Any running mode is torn
    /// down first.
    pub fn restore(&mut self, save: SaveData) {
        self.return_to_menu();
        let config = self.config.clone();
        let roster = self.roster.clone();
        *self = Self::from_save(save, config, roster);
    }
}

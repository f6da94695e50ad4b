//! Error taxonomy for engine operations.
//!
//! Simulation steps never return errors. Only requests issued from outside
//! the loops (stage selection, training, inventory moves, config and save
//! decoding) can be rejected, and a rejected request leaves state untouched.

use crate::items::GearSlot;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("stage {requested} is locked (frontier is stage {max_stage})")]
    StageLocked { requested: u32, max_stage: u32 },

    #[error("stage {0} is outside 1..=20")]
    InvalidStage(u32),

    #[error("need {needed} currency, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("supply capsule recharging, {remaining_ms}ms remaining")]
    SupplyCooldown { remaining_ms: i64 },

    #[error("no inventory item at index {0}")]
    NoSuchItem(usize),

    #[error("nothing equipped in the {0:?} slot")]
    EmptySlot(GearSlot),

    #[error("operation requires {0} mode")]
    NotInMode(&'static str),

    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("engine config value out of range: {0}")]
    InvalidConfig(String),

    #[error("failed to encode save: {0}")]
    SaveEncode(String),

    #[error("corrupt save: {0}")]
    SaveCorrupt(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

//! Real-time survival mode against endless spawns.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

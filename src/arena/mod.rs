//! Staged arena battles against scaling guardians.

pub mod logic;
pub mod timer;
pub mod types;

pub use logic::*;
pub use types::*;

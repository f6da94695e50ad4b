//! Item system: gear tiers, worn equipment and the stash.

pub mod equipment;
pub mod stash;
pub mod types;

pub use equipment::*;
pub use stash::*;
pub use types::*;

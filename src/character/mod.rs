//! Character: stats, leveling, ascension ranks and save encoding.

pub mod derived_stats;
pub mod progression;
pub mod ranks;
pub mod save;
pub mod types;

pub use derived_stats::*;
pub use progression::*;
pub use ranks::*;
pub use save::*;
pub use types::*;

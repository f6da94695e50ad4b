//! Headless balance simulator.
//!
//! Drives real `GameSession`s with seeded RNGs to measure:
//! - How far an idle arena campaign gets in a fixed time budget
//! - How often the player is defeated at each world
//! - How long a scripted pilot lasts in survival
//!
//! All combat runs through the same arena and survival code the game uses.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{CampaignStats, SimReport, SurvivalStats};
pub use runner::{run_simulation, simulate_campaign, simulate_survival, Pilot};

//! Simulation configuration.

use crate::core::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of arena campaigns to run
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Arena time each campaign gets, in seconds
    pub arena_seconds: f64,

    /// Length of one arena tick, in seconds
    pub tick_seconds: f64,

    /// Number of scripted survival runs
    pub survival_runs: u32,

    /// Frame limit for a single survival run
    pub max_frames: u64,

    /// Tuning the simulated sessions use
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            arena_seconds: 3600.0,
            tick_seconds: 0.1,
            survival_runs: 0,
            max_frames: 36_000,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short config for smoke-testing balance changes
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            arena_seconds: 600.0,
            survival_runs: 5,
            max_frames: 7_200,
            ..Default::default()
        }
    }

    /// Number of arena ticks one campaign runs for.
    pub fn arena_ticks(&self) -> u64 {
        if self.tick_seconds <= 0.0 {
            return 0;
        }
        (self.arena_seconds / self.tick_seconds).ceil() as u64
    }
}

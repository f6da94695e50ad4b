//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one idle arena campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignStats {
    pub stages_cleared: u64,
    pub defeats: u64,
    pub specials: u64,
    pub final_world: u32,
    pub final_stage: u32,
    pub final_level: u32,
    pub final_rank: u32,
    pub items_dropped: u64,
    /// Victories and defeats, indexed by world (index 0 unused).
    pub world_clears: Vec<u64>,
    pub world_defeats: Vec<u64>,
}

/// Outcome of one scripted survival run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurvivalStats {
    pub kills: u32,
    pub elite_kills: u32,
    pub frames: u64,
    pub ultimates: u32,
    pub hits_taken: u32,
    pub levels_gained: u32,
    /// The run hit the frame limit instead of ending in defeat.
    pub survived: bool,
}

/// Aggregated results from all simulated runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub arena_seconds: f64,

    pub avg_stages_cleared: f64,
    pub avg_defeats: f64,
    pub avg_specials: f64,
    pub avg_final_world: f64,
    pub avg_final_level: f64,
    pub avg_items_dropped: f64,
    pub max_world: u32,
    /// How many campaigns ended in each world.
    pub world_distribution: BTreeMap<u32, u32>,

    pub survival_runs: u32,
    pub avg_survival_kills: f64,
    pub avg_survival_frames: f64,
    pub avg_ultimates: f64,
    pub survival_completion_rate: f64,

    #[serde(skip)]
    pub campaigns: Vec<CampaignStats>,
    #[serde(skip)]
    pub survivals: Vec<SurvivalStats>,
}

fn mean<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(f).sum::<f64>() / items.len() as f64
}

impl SimReport {
    /// Create a new report from finished runs.
    pub fn from_runs(
        campaigns: Vec<CampaignStats>,
        survivals: Vec<SurvivalStats>,
        arena_seconds: f64,
    ) -> Self {
        let mut world_distribution = BTreeMap::new();
        for run in &campaigns {
            *world_distribution.entry(run.final_world).or_insert(0) += 1;
        }
        let max_world = campaigns.iter().map(|r| r.final_world).max().unwrap_or(0);
        let survived = survivals.iter().filter(|r| r.survived).count();
        let survival_completion_rate = if survivals.is_empty() {
            0.0
        } else {
            survived as f64 / survivals.len() as f64
        };

        Self {
            num_runs: campaigns.len() as u32,
            arena_seconds,
            avg_stages_cleared: mean(&campaigns, |r| r.stages_cleared as f64),
            avg_defeats: mean(&campaigns, |r| r.defeats as f64),
            avg_specials: mean(&campaigns, |r| r.specials as f64),
            avg_final_world: mean(&campaigns, |r| r.final_world as f64),
            avg_final_level: mean(&campaigns, |r| r.final_level as f64),
            avg_items_dropped: mean(&campaigns, |r| r.items_dropped as f64),
            max_world,
            world_distribution,
            survival_runs: survivals.len() as u32,
            avg_survival_kills: mean(&survivals, |r| r.kills as f64),
            avg_survival_frames: mean(&survivals, |r| r.frames as f64),
            avg_ultimates: mean(&survivals, |r| r.ultimates as f64),
            survival_completion_rate,
            campaigns,
            survivals,
        }
    }

    /// Defeats per victory, summed over all campaigns, for one world.
    pub fn defeat_ratio(&self, world: u32) -> Option<f64> {
        let index = world as usize;
        let (clears, defeats) = self.campaigns.iter().fold((0u64, 0u64), |acc, run| {
            (
                acc.0 + run.world_clears.get(index).copied().unwrap_or(0),
                acc.1 + run.world_defeats.get(index).copied().unwrap_or(0),
            )
        });
        (clears > 0).then(|| defeats as f64 / clears as f64)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Arena: {} campaigns, {:.0}s of battle time each\n\n",
            self.num_runs, self.arena_seconds
        ));

        report.push_str("── ARENA ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Stages Cleared:  {:.1}\n",
            self.avg_stages_cleared
        ));
        report.push_str(&format!("  Avg Defeats:         {:.1}\n", self.avg_defeats));
        report.push_str(&format!("  Avg Specials:        {:.1}\n", self.avg_specials));
        report.push_str(&format!(
            "  Avg Final World:     {:.2}\n",
            self.avg_final_world
        ));
        report.push_str(&format!("  Max World:           {}\n", self.max_world));
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Items Dropped:   {:.1}\n\n",
            self.avg_items_dropped
        ));

        report.push_str("── WORLDS ───────────────────────────────────────────────────────\n");
        for (world, count) in &self.world_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            let ratio = self
                .defeat_ratio(*world)
                .map(|r| format!("{:.2} defeats/clear", r))
                .unwrap_or_else(|| "no clears".to_string());
            report.push_str(&format!(
                "  World {:2}: {:>5.1}% {:<20} {}\n",
                world, pct, bar, ratio
            ));
        }
        report.push('\n');

        if self.survival_runs > 0 {
            report.push_str("── SURVIVAL ─────────────────────────────────────────────────────\n");
            report.push_str(&format!("  Runs:                {}\n", self.survival_runs));
            report.push_str(&format!(
                "  Avg Kills:           {:.1}\n",
                self.avg_survival_kills
            ));
            report.push_str(&format!(
                "  Avg Frames:          {:.0}\n",
                self.avg_survival_frames
            ));
            report.push_str(&format!("  Avg Ultimates:       {:.1}\n", self.avg_ultimates));
            report.push_str(&format!(
                "  Survived To Limit:   {:.1}%\n\n",
                self.survival_completion_rate * 100.0
            ));
        }

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.avg_stages_cleared < 5.0 {
            report.push_str("  ⚠️  Campaigns stall in the first stages - guardians too strong?\n");
        }
        if self.avg_defeats > self.avg_stages_cleared {
            report.push_str("  ⚠️  More defeats than clears - growth outpaces rewards\n");
        }
        if self.survival_runs > 0 && self.avg_survival_kills < 5.0 {
            report.push_str("  ⚠️  Survival pilot barely scores - spawns too punishing?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

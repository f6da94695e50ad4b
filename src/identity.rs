//! Cosmetic identities for guardians and survival spawns.
//!
//! Names and images are supplied by the host. A missing or empty roster never
//! blocks combat; lookups fall back to a placeholder.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_NAME: &str = "Guardian";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub image: Option<String>,
}

impl Identity {
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            image: None,
        }
    }
}

/// Host-provided cosmetic data: guardian identities and world backdrops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub guardians: Vec<Identity>,
    pub planets: Vec<String>,
}

impl Roster {
    pub fn new(guardians: Vec<Identity>, planets: Vec<String>) -> Self {
        Self { guardians, planets }
    }

    /// Guardian for a stage: `(stage + world * 3) % roster_len`.
    pub fn guardian_for(&self, stage: u32, world: u32) -> Identity {
        if self.guardians.is_empty() {
            log::warn!("guardian roster empty, using placeholder");
            return Identity::placeholder();
        }
        let index = (stage as usize + world as usize * 3) % self.guardians.len();
        self.guardians[index].clone()
    }

    /// Random identity for a survival spawn.
    pub fn random_guardian(&self, rng: &mut impl Rng) -> Identity {
        if self.guardians.is_empty() {
            return Identity::placeholder();
        }
        self.guardians[rng.gen_range(0..self.guardians.len())].clone()
    }

    /// Backdrop for a world: `(world - 1) % planets_len`, none when empty.
    pub fn backdrop_for(&self, world: u32) -> Option<&str> {
        if self.planets.is_empty() {
            return None;
        }
        let index = world.saturating_sub(1) as usize % self.planets.len();
        Some(self.planets[index].as_str())
    }
}

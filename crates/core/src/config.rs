//! Game configuration
//!
//! Everything a caller can tune about a game lives here. The struct is serde
//! (de)serialisable with per-field defaults so a partial JSON document is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::types::{SpawnPolicy, SPAWN_HIGH_PROBABILITY};

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the tile spawner
    pub seed: u64,
    /// Whether a move that shifts nothing still spawns a tile
    pub spawn_policy: SpawnPolicy,
    /// Chance that a spawned tile is a 4 instead of a 2
    pub four_probability: f64,
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_spawn_policy(mut self, spawn_policy: SpawnPolicy) -> Self {
        self.spawn_policy = spawn_policy;
        self
    }

    pub fn with_four_probability(mut self, four_probability: f64) -> Self {
        self.four_probability = four_probability;
        self
    }

    /// Resolve the 4-tile probability to a usable value.
    ///
    /// Clamped to [0, 1]; non-finite values fall back to the default 0.1.
    pub fn four_probability_or_default(&self) -> f64 {
        if self.four_probability.is_finite() {
            self.four_probability.clamp(0.0, 1.0)
        } else {
            SPAWN_HIGH_PROBABILITY
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            spawn_policy: SpawnPolicy::Always,
            four_probability: SPAWN_HIGH_PROBABILITY,
        }
    }
}

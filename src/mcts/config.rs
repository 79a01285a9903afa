//! Search budget and tuning knobs.

use serde::{Deserialize, Serialize};

use crate::core::{JassError, Result};
use crate::rules::HAND_SIZE;

/// Parameters of every search an [`MCTSSearch`](super::MCTSSearch) runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Exploration constant used while descending the tree.
    /// Scaled to turn points, so much larger than the textbook sqrt(2).
    pub exploration_constant: f64,

    /// Playouts per decision. Must be at least [`HAND_SIZE`] so every
    /// root move is tried once.
    pub iterations: u32,

    /// Seed for the playout RNG. Every decision restarts from this seed,
    /// so the same position always yields the same answer.
    pub seed: u64,

    /// Below this expected number of turn points, trump selection passes
    /// when passing is allowed.
    pub pass_threshold: f64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 40.0,
            iterations: 10_000,
            seed: 0,
            pass_threshold: 108.0,
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Playouts are reproducible per seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.pass_threshold = threshold;
        self
    }

    /// Reject budgets too small to visit every root move.
    pub fn validate(&self) -> Result<()> {
        if (self.iterations as usize) < HAND_SIZE {
            return Err(JassError::InvalidArgument(format!(
                "at least {HAND_SIZE} iterations required, got {}",
                self.iterations
            )));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(JassError::InvalidArgument(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}

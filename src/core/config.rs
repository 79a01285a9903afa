//! Match configuration.
//!
//! The orchestrator is configured at startup with a `GameConfig`. Per-decision
//! search parameters live in [`MCTSConfig`](crate::mcts::MCTSConfig).

use serde::{Deserialize, Serialize};

use super::{JassError, Result};
use crate::rules::WINNING_POINTS;

/// Highest target whose final turn still fits the 2000-point game counter.
pub const MAX_WINNING_POINTS: u32 = 2000 - 257 + 1;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for dealing and for replacing illegal plays.
    pub seed: u64,

    /// Total points a team needs to win the match.
    pub winning_points: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            winning_points: WINNING_POINTS,
        }
    }
}

impl GameConfig {
    /// Create a config with the given seed and standard rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the points needed to win.
    #[must_use]
    pub fn with_winning_points(mut self, points: u32) -> Self {
        self.winning_points = points;
        self
    }

    /// Reject targets of zero or beyond [`MAX_WINNING_POINTS`].
    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_WINNING_POINTS).contains(&self.winning_points) {
            Ok(())
        } else {
            Err(JassError::InvalidArgument(format!(
                "winning points must be in 1..={MAX_WINNING_POINTS}, got {}",
                self.winning_points
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.winning_points, 1000);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new(7).with_winning_points(500).with_seed(9);
        assert_eq!(config.seed, 9);
        assert_eq!(config.winning_points, 500);
    }

    #[test]
    fn test_validate() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::default().with_winning_points(MAX_WINNING_POINTS).validate().is_ok());
        assert!(GameConfig::default().with_winning_points(0).validate().is_err());
        assert!(GameConfig::default().with_winning_points(MAX_WINNING_POINTS + 1).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}

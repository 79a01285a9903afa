//! Core types: seats and teams, RNG, errors, configuration.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{JassError, Result};
pub use player::{PlayerId, PlayerMap, TeamId};
pub use rng::GameRng;

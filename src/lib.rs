//! # rust-jass
//!
//! Schieber-style Jass for four players in two teams, with a Monte Carlo
//! Tree Search player.
//!
//! ## Design Principles
//!
//! 1. **Packed Values**: cards, card sets, tricks, scores and whole turn
//!    states are small `Copy` integers. Every transition returns a new value,
//!    so search nodes can store states without any cloning cost.
//!
//! 2. **Checked Surface, Unchecked Core**: public operations validate their
//!    input and return [`JassError`]; the search uses crate-internal
//!    variants that skip checks its own invariants already guarantee.
//!
//! 3. **Reproducible**: all randomness flows from a seeded [`GameRng`].
//!    The same seed deals the same cards and the search returns the same
//!    card for the same position.
//!
//! ## Modules
//!
//! - `cards`: cards and card sets
//! - `core`: seats, teams, RNG, errors, configuration
//! - `rules`: tricks, scores, turn state machine
//! - `mcts`: Monte Carlo Tree Search over one turn
//! - `players`: the `Player` seat trait and its implementations
//! - `net`: line-based text protocol for remote seats
//! - `game`: dealing, trump selection and trick play for a whole match

pub(crate) mod bits;

pub mod cards;
pub mod core;
pub mod game;
pub mod mcts;
pub mod net;
pub mod players;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{Card, CardSet, Color, Rank};

pub use crate::core::{GameConfig, GameRng, JassError, PlayerId, PlayerMap, Result, TeamId};

pub use crate::rules::{Score, Trick, TurnState};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};

pub use crate::players::{MctsPlayer, PacedPlayer, Player};

pub use crate::game::JassGame;

//! Monte Carlo Tree Search for Jass.
//!
//! ## Overview
//!
//! The search plays one turn forward from the current [`TurnState`], using
//! only what the searching seat knows:
//!
//! - **Determinization**: other seats may play any unplayed card outside the
//!   searcher's hand, subject to the trick rules
//! - **Fixed budget**: a decision is exactly `iterations` playouts, each from
//!   a freshly seeded RNG, so the same position always gives the same answer
//! - **Configurable Policies**: selection (UCB1) and simulation (random playout)
//! - **Serializable**: tree and config can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use rust_jass::cards::{CardSet, Color};
//! use rust_jass::core::PlayerId;
//! use rust_jass::mcts::{MCTSConfig, MCTSSearch};
//! use rust_jass::rules::{Score, TurnState};
//!
//! let config = MCTSConfig::default().with_iterations(200);
//! let mut search = MCTSSearch::new(PlayerId::Player1, config).unwrap();
//!
//! let hand = CardSet::ALL_CARDS.subset_of_color(Color::Heart);
//! let state = TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player1);
//! let card = search.card_to_play(&state, hand).unwrap();
//! assert!(hand.contains(card));
//! ```
//!
//! [`TurnState`]: crate::rules::TurnState

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{Determinization, RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};

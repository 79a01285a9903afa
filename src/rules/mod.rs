//! Jass rules: tricks, scores and the turn state machine.

pub mod score;
pub mod trick;
pub mod turn;

pub use score::Score;
pub use trick::Trick;
pub use turn::TurnState;

/// Cards dealt to each player per turn.
pub const HAND_SIZE: usize = 9;

/// Tricks in a turn.
pub const TRICKS_PER_TURN: usize = 9;

/// Total points a team must reach to win the game.
pub const WINNING_POINTS: u32 = 1000;

/// Bonus for taking every trick of a turn.
pub const MATCH_ADDITIONAL_POINTS: u32 = 100;

/// Bonus for taking the last trick of a turn.
pub const LAST_TRICK_ADDITIONAL_POINTS: u32 = 5;

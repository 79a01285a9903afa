//! Seats at the table.
//!
//! A [`Player`] answers the two questions the game asks (which trump, which
//! card) and is told about everything else that happens. Local AI players,
//! UI-bound players and network proxies all plug in through this trait; the
//! game never needs to know which kind is sitting where.

pub mod mcts;
pub mod paced;

pub use mcts::MctsPlayer;
pub use paced::PacedPlayer;

use crate::cards::{Card, CardSet, Color};
use crate::core::{PlayerId, PlayerMap, Result, TeamId};
use crate::rules::{Score, Trick, TurnState};

/// A participant in a game of Jass.
///
/// Only the two decisions are required; every notification defaults to a
/// no-op.
pub trait Player: Send {
    /// Card to play next, chosen from `hand` according to `state`.
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card>;

    /// Trump for the coming turn, or `None` to pass to the partner.
    /// `None` is only honored when `can_pass` is true.
    fn choose_trump(&mut self, hand: CardSet, can_pass: bool) -> Result<Option<Color>>;

    /// Seat assignment and everyone's names, sent once at the start.
    fn set_players(&mut self, _own_id: PlayerId, _names: &PlayerMap<String>) {}

    fn update_hand(&mut self, _hand: CardSet) {}

    fn set_trump(&mut self, _trump: Color) {}

    fn update_trick(&mut self, _trick: Trick) {}

    fn update_score(&mut self, _score: Score) {}

    /// Sent once when the game ends.
    fn set_winning_team(&mut self, _team: TeamId) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        (**self).card_to_play(state, hand)
    }

    fn choose_trump(&mut self, hand: CardSet, can_pass: bool) -> Result<Option<Color>> {
        (**self).choose_trump(hand, can_pass)
    }

    fn set_players(&mut self, own_id: PlayerId, names: &PlayerMap<String>) {
        (**self).set_players(own_id, names);
    }

    fn update_hand(&mut self, hand: CardSet) {
        (**self).update_hand(hand);
    }

    fn set_trump(&mut self, trump: Color) {
        (**self).set_trump(trump);
    }

    fn update_trick(&mut self, trick: Trick) {
        (**self).update_trick(trick);
    }

    fn update_score(&mut self, score: Score) {
        (**self).update_score(score);
    }

    fn set_winning_team(&mut self, team: TeamId) {
        (**self).set_winning_team(team);
    }
}

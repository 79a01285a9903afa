//! Immutable state of one turn: the score, the cards still out and the
//! trick in progress.

use serde::{Deserialize, Serialize};

use super::{Score, Trick};
use crate::cards::{Card, CardSet, Color};
use crate::core::{JassError, PlayerId, Result};

/// Everything public about a turn in progress.
///
/// A turn is terminal once its 9th trick has been collected; the trick is
/// then [`Trick::INVALID`] and no further transition is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    score: Score,
    unplayed: CardSet,
    trick: Trick,
}

impl TurnState {
    /// Start of a turn: nothing played, first trick led by `first_player`.
    #[must_use]
    pub fn initial(trump: Color, score: Score, first_player: PlayerId) -> Self {
        Self {
            score,
            unplayed: CardSet::ALL_CARDS,
            trick: Trick::first_empty(trump, first_player),
        }
    }

    /// Rebuild a state from its three packed parts. The result is never
    /// terminal.
    pub fn of_packed_components(score: u64, unplayed: u64, trick: u32) -> Result<Self> {
        Ok(Self {
            score: Score::of_packed(score)?,
            unplayed: CardSet::of_packed(unplayed)?,
            trick: Trick::of_packed(trick)?,
        })
    }

    #[must_use]
    pub fn packed_score(&self) -> u64 {
        self.score.packed()
    }

    #[must_use]
    pub fn packed_unplayed_cards(&self) -> u64 {
        self.unplayed.packed()
    }

    #[must_use]
    pub fn packed_trick(&self) -> u32 {
        self.trick.packed()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Cards not yet placed on a trick this turn.
    #[must_use]
    pub fn unplayed_cards(&self) -> CardSet {
        self.unplayed
    }

    #[must_use]
    pub fn trick(&self) -> Trick {
        self.trick
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.trick.is_invalid()
    }

    /// Seat whose card is awaited.
    pub fn next_player(&self) -> Result<PlayerId> {
        self.check_open()?;
        Ok(self.next_player_unchecked())
    }

    pub(crate) fn next_player_unchecked(&self) -> PlayerId {
        self.trick.player(self.trick.size())
    }

    /// This state after the next player places `card`.
    ///
    /// Legality against the player's hand is the caller's concern; only
    /// replaying a card already on the table is rejected here.
    pub fn with_new_card_played(&self, card: Card) -> Result<Self> {
        self.check_open()?;
        if !self.unplayed.contains(card) {
            return Err(JassError::InvalidArgument(format!("{card} was already played")));
        }
        Ok(self.with_new_card_played_unchecked(card))
    }

    fn with_new_card_played_unchecked(&self, card: Card) -> Self {
        Self {
            score: self.score,
            unplayed: self.unplayed.remove(card),
            trick: self.trick.with_added_card_unchecked(card),
        }
    }

    /// This state after the full trick goes to its winner's team.
    pub fn with_trick_collected(&self) -> Result<Self> {
        if self.is_terminal() {
            return Err(JassError::InvalidState("turn is over"));
        }
        if !self.trick.is_full() {
            return Err(JassError::InvalidState("trick collected before it is full"));
        }
        Ok(self.with_trick_collected_unchecked())
    }

    fn with_trick_collected_unchecked(&self) -> Self {
        let winner = self.trick.winning_player_unchecked();
        Self {
            score: self.score.with_additional_trick(winner.team(), self.trick.points()),
            unplayed: self.unplayed,
            trick: self.trick.next_empty_unchecked(),
        }
    }

    /// Play `card`, then collect the trick if that filled it.
    pub fn with_new_card_played_and_trick_collected(&self, card: Card) -> Result<Self> {
        let played = self.with_new_card_played(card)?;
        if played.trick.is_full() {
            played.with_trick_collected()
        } else {
            Ok(played)
        }
    }

    /// Search fast path of [`with_new_card_played_and_trick_collected`] for
    /// cards already known to be legal.
    ///
    /// [`with_new_card_played_and_trick_collected`]: Self::with_new_card_played_and_trick_collected
    pub(crate) fn advance(&self, card: Card) -> Self {
        debug_assert!(!self.is_terminal() && self.unplayed.contains(card));
        let played = self.with_new_card_played_unchecked(card);
        if played.trick.is_full() {
            played.with_trick_collected_unchecked()
        } else {
            played
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.is_terminal() {
            Err(JassError::InvalidState("turn is over"))
        } else if self.trick.is_full() {
            Err(JassError::InvalidState("trick is full and must be collected"))
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_terminal() {
            write!(f, "score {} (turn over)", self.score)
        } else {
            write!(f, "score {} trick {} unplayed {}", self.score, self.trick, self.unplayed.size())
        }
    }
}

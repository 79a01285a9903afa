//! Decision pacing for human opponents.

use std::thread;
use std::time::{Duration, Instant};

use super::Player;
use crate::cards::{Card, CardSet, Color};
use crate::core::{PlayerId, PlayerMap, Result, TeamId};
use crate::rules::{Score, Trick, TurnState};

/// Wraps a player so that a card is never returned faster than `min_time`.
///
/// The wrapped player computes at full speed; only the answer is held back.
/// Trump choices and notifications pass straight through.
pub struct PacedPlayer<P> {
    inner: P,
    min_time: Duration,
}

impl<P: Player> PacedPlayer<P> {
    pub fn new(inner: P, min_time: Duration) -> Self {
        Self { inner, min_time }
    }

    #[must_use]
    pub fn min_time(&self) -> Duration {
        self.min_time
    }

    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Player> Player for PacedPlayer<P> {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        let start = Instant::now();
        let card = self.inner.card_to_play(state, hand);
        if let Some(remaining) = self.min_time.checked_sub(start.elapsed()) {
            thread::sleep(remaining);
        }
        card
    }

    fn choose_trump(&mut self, hand: CardSet, can_pass: bool) -> Result<Option<Color>> {
        self.inner.choose_trump(hand, can_pass)
    }

    fn set_players(&mut self, own_id: PlayerId, names: &PlayerMap<String>) {
        self.inner.set_players(own_id, names);
    }

    fn update_hand(&mut self, hand: CardSet) {
        self.inner.update_hand(hand);
    }

    fn set_trump(&mut self, trump: Color) {
        self.inner.set_trump(trump);
    }

    fn update_trick(&mut self, trick: Trick) {
        self.inner.update_trick(trick);
    }

    fn update_score(&mut self, score: Score) {
        self.inner.update_score(score);
    }

    fn set_winning_team(&mut self, team: TeamId) {
        self.inner.set_winning_team(team);
    }
}

//! Local AI player backed by [`MCTSSearch`].

use log::debug;

use super::Player;
use crate::cards::{Card, CardSet, Color};
use crate::core::{PlayerId, Result, TeamId};
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::rules::TurnState;

/// Plays every decision by running a fresh search.
pub struct MctsPlayer {
    search: MCTSSearch,
}

impl MctsPlayer {
    /// Fails if `config` asks for fewer iterations than a hand has cards.
    pub fn new(own_id: PlayerId, config: MCTSConfig) -> Result<Self> {
        Ok(Self {
            search: MCTSSearch::new(own_id, config)?,
        })
    }

    /// The underlying search, e.g. to inspect the last tree.
    #[must_use]
    pub fn search(&self) -> &MCTSSearch {
        &self.search
    }
}

impl Player for MctsPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        self.search.card_to_play(state, hand)
    }

    fn choose_trump(&mut self, hand: CardSet, can_pass: bool) -> Result<Option<Color>> {
        self.search.choose_trump(hand, can_pass)
    }

    fn set_winning_team(&mut self, team: TeamId) {
        let own_id = self.search.own_id();
        if own_id.team() == team {
            debug!("{own_id}: game won");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Score;

    #[test]
    fn test_rejects_small_budget() {
        let config = MCTSConfig::default().with_iterations(3);
        assert!(MctsPlayer::new(PlayerId::Player1, config).is_err());
    }

    #[test]
    fn test_plays_from_hand() {
        let config = MCTSConfig::default().with_iterations(100);
        let mut player = MctsPlayer::new(PlayerId::Player4, config).unwrap();
        let hand = CardSet::ALL_CARDS.subset_of_color(Color::Diamond);
        let state = TurnState::initial(Color::Club, Score::INITIAL, PlayerId::Player4);

        let card = player.card_to_play(&state, hand).unwrap();
        assert!(hand.contains(card));
        assert_eq!(player.search().stats().iterations, 100);
    }

    #[test]
    fn test_as_trait_object() {
        let config = MCTSConfig::default().with_iterations(50);
        let mut player: Box<dyn Player> = Box::new(MctsPlayer::new(PlayerId::Player1, config).unwrap());
        let hand = CardSet::ALL_CARDS.subset_of_color(Color::Spade);
        assert!(player.choose_trump(hand, false).unwrap().is_some());
    }
}

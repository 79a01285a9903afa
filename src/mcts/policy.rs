//! MCTS policies for selection and simulation, plus the determinization
//! that decides which cards each seat may play.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `SimulationPolicy`: How to run rollouts (uniform random)

use crate::cards::CardSet;
use crate::core::{GameRng, PlayerId};
use crate::rules::{Score, TurnState};

use super::node::MCTSNode;
use super::tree::MCTSTree;

// =============================================================================
// Determinization
// =============================================================================

/// What the searching player knows: its own seat and hand.
///
/// The other three hands are unknown, so any unplayed card outside the
/// searcher's hand is treated as available to whichever opponent or partner
/// is next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Determinization {
    own_id: PlayerId,
    hand: CardSet,
}

impl Determinization {
    pub fn new(own_id: PlayerId, hand: CardSet) -> Self {
        Self { own_id, hand }
    }

    #[must_use]
    pub fn own_id(&self) -> PlayerId {
        self.own_id
    }

    #[must_use]
    pub fn hand(&self) -> CardSet {
        self.hand
    }

    /// Cards the next player may play in `state`, or nothing once the turn
    /// is over. `state` must not hold an uncollected full trick.
    #[must_use]
    pub fn playable(&self, state: &TurnState) -> CardSet {
        if state.is_terminal() {
            return CardSet::EMPTY;
        }
        let unplayed = state.unplayed_cards();
        let candidates = if state.next_player_unchecked() == self.own_id {
            unplayed.intersection(self.hand)
        } else {
            unplayed.difference(self.hand)
        };
        state.trick().playable_cards_unchecked(candidates)
    }
}

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child of a fully expanded `node`.
    ///
    /// Returns the index into `node.children`.
    fn select(&self, tree: &MCTSTree, node: &MCTSNode, exploration: f64) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high mean) with exploration (low visits).
/// Formula: mean + c * sqrt(2 ln(N)) / sqrt(n)
///
/// Children are only ever scored once they have been visited, so the
/// cached `1/sqrt(n)` is always finite.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, tree: &MCTSTree, node: &MCTSNode, exploration: f64) -> usize {
        let numerator = exploration * (2.0 * f64::from(node.visits.max(1)).ln()).sqrt();

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, &id) in node.children.iter().enumerate() {
            let child = tree.get(id);
            let score = child.mean + numerator * child.inv_sqrt_visits;
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy: Send + Sync {
    /// Play `state` out to the end of the turn and return the final score.
    fn simulate(&self, state: TurnState, moves: &Determinization, rng: &mut GameRng) -> Score;
}

/// Random simulation policy.
///
/// Plays uniformly random legal cards until the turn is over.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout;

impl SimulationPolicy for RandomPlayout {
    fn simulate(&self, mut state: TurnState, moves: &Determinization, rng: &mut GameRng) -> Score {
        while !state.is_terminal() {
            let playable = moves.playable(&state);
            let card = playable.get(rng.gen_index(playable.size()));
            state = state.advance(card);
        }
        state.score()
    }
}

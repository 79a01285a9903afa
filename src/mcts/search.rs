//! Core MCTS search algorithm.
//!
//! Each decision builds a fresh tree rooted at the current turn state and
//! runs a fixed number of playouts over it. Cards of the other three seats
//! are drawn from everything the searching player cannot see (see
//! [`Determinization`]).

use std::time::Instant;

use log::debug;

use crate::cards::{Card, CardSet, Color};
use crate::core::{GameRng, JassError, PlayerId, Result};
use crate::rules::{Score, TurnState, TRICKS_PER_TURN};

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId};
use super::policy::{Determinization, RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Root plus one node per card of the turn.
const MAX_PATH: usize = 1 + 4 * TRICKS_PER_TURN;

/// Main MCTS search context.
///
/// Owns the search tree and configuration for one seat, and provides the
/// two decisions a player has to make.
pub struct MCTSSearch {
    /// Seat the search plays for.
    own_id: PlayerId,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree of the last decision.
    tree: MCTSTree,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Search statistics of the last decision.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a new MCTS search context for `own_id`.
    pub fn new(own_id: PlayerId, config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        let placeholder = MCTSNode::root(
            TurnState::initial(Color::Spade, Score::INITIAL, own_id),
            own_id.team(),
            CardSet::EMPTY,
        );
        let capacity = config.iterations as usize + 1;
        Ok(Self {
            own_id,
            config,
            tree: MCTSTree::with_capacity(placeholder, capacity),
            selection: Box::new(UCB1),
            simulation: Box::new(RandomPlayout),
            stats: SearchStats::default(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Best card for the searching player to play in `state`.
    ///
    /// Fails if the turn is over, if it is another seat's turn, or if `hand`
    /// does not hold exactly the cards the searching player has left.
    pub fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        state.next_player()?;
        let best = self.search(*state, hand)?;
        let node = self.tree.get(best);
        let card = node.card.ok_or(JassError::InvalidState("root child without a card"))?;
        debug!("{}: plays {} (mean {:.1}; {})", self.own_id, card, node.mean, self.stats);
        Ok(card)
    }

    /// Trump color to announce with `hand`, or `None` to pass.
    ///
    /// Runs one search per color as if leading the first trick, and keeps
    /// the color with the best expected turn points. Passing is only chosen
    /// when `can_pass` holds and even the best color falls short of the
    /// configured threshold.
    pub fn choose_trump(&mut self, hand: CardSet, can_pass: bool) -> Result<Option<Color>> {
        let start = Instant::now();
        let mut best = Color::Spade;
        let mut best_mean = f64::NEG_INFINITY;
        for color in Color::ALL {
            let state = TurnState::initial(color, Score::INITIAL, self.own_id);
            let mean = self.evaluate(&state, hand)?;
            if mean > best_mean {
                best_mean = mean;
                best = color;
            }
        }
        let choice = if can_pass && best_mean < self.config.pass_threshold {
            None
        } else {
            Some(best)
        };
        debug!(
            "{}: trump {} (best {} at {:.1}, {:?})",
            self.own_id,
            choice.map_or_else(|| "pass".to_owned(), |c| c.to_string()),
            best,
            best_mean,
            start.elapsed()
        );
        Ok(choice)
    }

    /// Expected turn points of the searching team when it plays its best
    /// card from `state` with `hand`.
    ///
    /// An uncollected full trick in `state` is collected first. Fails like
    /// [`card_to_play`](Self::card_to_play) when the turn is over or another
    /// seat is next.
    pub fn evaluate(&mut self, state: &TurnState, hand: CardSet) -> Result<f64> {
        let best = self.search(*state, hand)?;
        Ok(self.tree.get(best).mean)
    }

    /// Run a full search from `state` and return the root child with the
    /// best mean.
    fn search(&mut self, state: TurnState, hand: CardSet) -> Result<NodeId> {
        let start = Instant::now();
        self.stats.reset();

        let state = if state.trick().is_full() {
            state.with_trick_collected()?
        } else {
            state
        };
        if state.is_terminal() {
            return Err(JassError::InvalidState("turn is over"));
        }
        if state.next_player_unchecked() != self.own_id {
            return Err(JassError::InvalidState("search requested out of turn"));
        }
        let moves = Determinization::new(self.own_id, hand);
        self.check_hand(&state, hand)?;

        let legal = moves.playable(&state);
        self.tree.reset(MCTSNode::root(state, self.own_id.team(), legal));
        let mut rng = GameRng::new(self.config.seed);

        while self.tree.root_node().visits < self.config.iterations {
            self.iteration(&moves, &mut rng);
            self.stats.iterations += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        self.tree
            .best_child_by_mean(self.tree.root())
            .ok_or(JassError::InvalidState("search produced no move"))
    }

    /// Reject hands that cannot be the searching player's remaining cards,
    /// since playouts would run out of cards for some seat.
    fn check_hand(&self, state: &TurnState, hand: CardSet) -> Result<()> {
        let trick = state.trick();
        let position = (self.own_id.index() + PlayerId::COUNT - trick.player(0).index()) % PlayerId::COUNT;
        let already_played = usize::from(position < trick.size());
        let left = TRICKS_PER_TURN - trick.index() - already_played;
        let held = state.unplayed_cards().intersection(hand).size();
        if held == left {
            Ok(())
        } else {
            Err(JassError::InvalidArgument(format!(
                "{} has {left} cards left to play but the hand holds {held} unplayed cards",
                self.own_id
            )))
        }
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, moves: &Determinization, rng: &mut GameRng) {
        let mut path = [NodeId::NONE; MAX_PATH];
        let mut len = 0;
        let mut current = self.tree.root();

        // === SELECTION / EXPANSION ===
        loop {
            path[len] = current;
            len += 1;

            let node = self.tree.get(current);
            if node.is_leaf() {
                self.stats.terminal_hits += 1;
                break;
            }
            if !node.is_fully_expanded() {
                current = self.expand(current, moves);
                path[len] = current;
                len += 1;
                break;
            }
            let idx = self.selection.select(&self.tree, node, self.config.exploration_constant);
            current = node.children[idx];
        }

        // === SIMULATION ===
        let leaf = self.tree.get(current).state;
        let final_score = self.simulation.simulate(leaf, moves, rng);

        // === BACKPROPAGATION ===
        for &id in &path[..len] {
            let node = self.tree.get_mut(id);
            let points = final_score.turn_points(node.team);
            node.record(points);
        }
    }

    /// Materialize the child for the lowest unexpanded move of `parent_id`.
    fn expand(&mut self, parent_id: NodeId, moves: &Determinization) -> NodeId {
        let parent = self.tree.get(parent_id);
        let card = parent.unexpanded.get(0);
        let mover = parent.state.next_player_unchecked();
        let state = parent.state.advance(card);
        let depth = parent.depth + 1;

        let child = MCTSNode::new(state, Some(card), mover.team(), moves.playable(&state), depth);
        let child_id = self.tree.alloc(child);

        let parent = self.tree.get_mut(parent_id);
        parent.unexpanded = parent.unexpanded.remove(card);
        parent.children.push(child_id);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        child_id
    }

    /// Seat this search plays for.
    #[must_use]
    pub fn own_id(&self) -> PlayerId {
        self.own_id
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

//! Tree nodes: one per card played below the root.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardSet};
use crate::core::TeamId;
use crate::rules::TurnState;

/// Position of a node in its [`MCTSTree`](super::MCTSTree) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Placeholder for unused slots of the selection path.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return f.write_str("NodeId(NONE)");
        }
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the MCTS tree: the turn right after one card was played.
///
/// Full tricks are collected before the state is stored, so a node's state
/// is either terminal or awaiting a card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// State reached by playing `card`.
    pub state: TurnState,

    /// Card that led here (`None` for the root).
    pub card: Option<Card>,

    /// Team of the player who played `card`; the searching team at the root.
    pub team: TeamId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Sum of `team`'s turn points over all playouts through this node.
    pub total_points: u64,

    /// Playouts through this node.
    pub visits: u32,

    /// `total_points / visits`, cached.
    pub mean: f64,

    /// `1 / sqrt(visits)`, cached.
    pub inv_sqrt_visits: f64,

    /// Legal moves that have no child yet.
    pub unexpanded: CardSet,

    /// Expanded children, in expansion order.
    /// Sized for the legal move count at creation and never grown past it.
    pub children: SmallVec<[NodeId; 9]>,
}

impl MCTSNode {
    /// Create a new node with `legal` as its unexpanded moves.
    pub fn new(state: TurnState, card: Option<Card>, team: TeamId, legal: CardSet, depth: u16) -> Self {
        Self {
            state,
            card,
            team,
            depth,
            total_points: 0,
            visits: 0,
            mean: 0.0,
            inv_sqrt_visits: 0.0,
            unexpanded: legal,
            children: SmallVec::with_capacity(legal.size()),
        }
    }

    /// Create a root node.
    pub fn root(state: TurnState, team: TeamId, legal: CardSet) -> Self {
        Self::new(state, None, team, legal, 0)
    }

    /// Check if the node has no legal moves at all.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.unexpanded.is_empty()
    }

    /// Check if every legal move has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded.is_empty()
    }

    /// Record one playout ending with `points` for this node's team.
    pub fn record(&mut self, points: u32) {
        self.total_points += u64::from(points);
        self.visits += 1;
        self.mean = self.total_points as f64 / f64::from(self.visits);
        self.inv_sqrt_visits = 1.0 / f64::from(self.visits).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Rank};
    use crate::core::PlayerId;
    use crate::rules::Score;

    fn initial() -> TurnState {
        TurnState::initial(Color::Spade, Score::INITIAL, PlayerId::Player1)
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let legal = CardSet::ALL_CARDS.subset_of_color(Color::Heart);
        let node = MCTSNode::root(initial(), TeamId::Team1, legal);

        assert!(node.card.is_none());
        assert_eq!(node.depth, 0);
        assert_eq!(node.visits, 0);
        assert!(!node.is_leaf());
        assert!(!node.is_fully_expanded());
        assert!(node.children.is_empty());
        assert_eq!(node.children.capacity(), 9);
    }

    #[test]
    fn test_node_leaf() {
        let node = MCTSNode::root(initial(), TeamId::Team2, CardSet::EMPTY);
        assert!(node.is_leaf());
        assert!(node.is_fully_expanded());
    }

    #[test]
    fn test_record_updates_cache() {
        let card = Card::of(Color::Club, Rank::Ace);
        let mut node = MCTSNode::new(initial(), Some(card), TeamId::Team1, CardSet::EMPTY, 1);

        node.record(100);
        assert_eq!(node.mean, 100.0);
        assert_eq!(node.inv_sqrt_visits, 1.0);

        node.record(50);
        node.record(0);
        node.record(50);
        assert_eq!(node.visits, 4);
        assert_eq!(node.total_points, 200);
        assert_eq!(node.mean, 50.0);
        assert_eq!(node.inv_sqrt_visits, 0.5);
    }

    #[test]
    fn test_serialization() {
        let mut node = MCTSNode::root(initial(), TeamId::Team1, CardSet::ALL_CARDS);
        node.children.push(NodeId::new(1));
        node.visits = 100;

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: MCTSNode = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.state, node.state);
        assert_eq!(deserialized.visits, 100);
        assert_eq!(deserialized.children.len(), 1);
        assert_eq!(deserialized.unexpanded, CardSet::ALL_CARDS);
    }
}

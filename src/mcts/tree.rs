//! Node arena for one search.
//!
//! Children refer to each other by [`NodeId`] index into a flat vector, so
//! the whole tree is one allocation that can be cleared and reused between
//! decisions, and serialized for inspection.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::cards::Card;

/// Search tree over the rest of a turn.
///
/// The root is always the first node. The arena only grows during a search;
/// [`reset`](Self::reset) drops everything but keeps the allocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    nodes: Vec<MCTSNode>,
    root: NodeId,
}

impl MCTSTree {
    pub fn new(root: MCTSNode) -> Self {
        Self::with_capacity(root, 1024)
    }

    /// Tree whose arena has room for `capacity` nodes up front.
    pub fn with_capacity(root: MCTSNode, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    /// # Panics
    ///
    /// If `id` was not allocated in this tree since the last reset.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.raw() as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.raw() as usize]
    }

    /// Append `node` to the arena. Linking it to a parent is up to the
    /// caller.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes and start over from `root`.
    pub fn reset(&mut self, root: MCTSNode) {
        self.nodes.clear();
        self.nodes.push(root);
        self.root = NodeId::new(0);
    }

    /// Child of `id` with the highest mean; the first one wins ties.
    #[must_use]
    pub fn best_child_by_mean(&self, id: NodeId) -> Option<NodeId> {
        let mut best = None;
        let mut best_mean = f64::NEG_INFINITY;
        for &child in &self.get(id).children {
            let mean = self.get(child).mean;
            if mean > best_mean {
                best_mean = mean;
                best = Some(child);
            }
        }
        best
    }

    /// Cards along the best-mean path from the root: the line of play the
    /// search currently expects.
    #[must_use]
    pub fn principal_variation(&self) -> Vec<Card> {
        let mut cards = Vec::new();
        let mut current = self.root;
        while let Some(child) = self.best_child_by_mean(current) {
            cards.extend(self.get(child).card);
            current = child;
        }
        cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Shape of the tree after a search.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            stats.terminal_count += usize::from(node.state.is_terminal());
            stats.expanded_moves += node.children.len();
            stats.total_moves += node.children.len() + node.unexpanded.size();
        }
        stats
    }
}

/// Size and shape of an [`MCTSTree`].
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    pub node_count: usize,

    /// Cards played below the root on the deepest path.
    pub max_depth: u16,

    /// Nodes at the end of the turn.
    pub terminal_count: usize,

    /// Legal cards summed over all nodes, expanded or not.
    pub total_moves: usize,

    /// Legal cards that already have a child.
    pub expanded_moves: usize,
}

impl TreeStats {
    /// Average number of legal cards per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.node_count as f64
        }
    }

    /// Fraction of legal cards that have a child.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_moves == 0 {
            0.0
        } else {
            self.expanded_moves as f64 / self.total_moves as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardSet, Color, Rank};
    use crate::core::{PlayerId, TeamId};
    use crate::rules::{Score, TurnState};

    fn state() -> TurnState {
        TurnState::initial(Color::Diamond, Score::INITIAL, PlayerId::Player1)
    }

    fn card(rank: Rank) -> Card {
        Card::of(Color::Heart, rank)
    }

    fn legal() -> CardSet {
        CardSet::of([card(Rank::Six), card(Rank::Ten), card(Rank::Ace)])
    }

    fn child(c: Card) -> MCTSNode {
        let next = state().with_new_card_played(c).unwrap();
        MCTSNode::new(next, Some(c), TeamId::Team1, CardSet::EMPTY, 1)
    }

    /// Root with its three children expanded and given fixed means.
    fn tree_with_means(means: [u32; 3]) -> MCTSTree {
        let mut tree = MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal()));
        for (c, mean) in legal().iter().zip(means) {
            let mut node = child(c);
            node.record(mean);
            let id = tree.alloc(node);
            let root = tree.root();
            let root = tree.get_mut(root);
            root.unexpanded = root.unexpanded.remove(c);
            root.children.push(id);
        }
        tree
    }

    #[test]
    fn test_tree_new() {
        let tree = MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal()));

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_node().unexpanded.size(), 3);
    }

    #[test]
    fn test_tree_alloc() {
        let mut tree = MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal()));

        let child_id = tree.alloc(child(card(Rank::Ten)));

        assert_eq!(child_id, NodeId::new(1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(child_id).card, Some(card(Rank::Ten)));
    }

    #[test]
    fn test_tree_get_mut() {
        let mut tree = MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal()));

        tree.get_mut(tree.root()).visits = 100;

        assert_eq!(tree.get(tree.root()).visits, 100);
    }

    #[test]
    fn test_tree_reset() {
        let mut tree = tree_with_means([1, 2, 3]);
        assert_eq!(tree.len(), 4);

        tree.reset(MCTSNode::root(state(), TeamId::Team2, CardSet::EMPTY));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().team, TeamId::Team2);
    }

    #[test]
    fn test_best_child_by_mean() {
        let tree = tree_with_means([20, 70, 40]);
        let best = tree.best_child_by_mean(tree.root()).unwrap();
        assert_eq!(tree.get(best).card, Some(card(Rank::Ten)));
    }

    #[test]
    fn test_best_child_first_maximum_wins() {
        let tree = tree_with_means([50, 50, 10]);
        let best = tree.best_child_by_mean(tree.root()).unwrap();
        assert_eq!(tree.get(best).card, Some(card(Rank::Six)));

        let leaf = tree.get(best).children.first().copied();
        assert!(leaf.is_none());
        assert!(tree.best_child_by_mean(best).is_none());
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal()));
        let root = tree.root();
        let id = tree.alloc(child(card(Rank::Six)));
        tree.get_mut(root).children.push(id);
        tree.get_mut(root).unexpanded = legal().remove(card(Rank::Six));

        let stats = tree.stats();

        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.terminal_count, 0);
        assert_eq!(stats.total_moves, 3);
        assert_eq!(stats.expanded_moves, 1);
        assert!((stats.expansion_ratio() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.branching_factor(), 1.5);
    }

    #[test]
    fn test_principal_variation() {
        let mut tree = tree_with_means([30, 80, 10]);
        let ten = tree.best_child_by_mean(tree.root()).unwrap();
        let after = tree.get(ten).state;
        let follow = Card::of(Color::Heart, Rank::King);
        let next = after.with_new_card_played(follow).unwrap();
        let id = tree.alloc(MCTSNode::new(next, Some(follow), TeamId::Team2, CardSet::EMPTY, 2));
        tree.get_mut(ten).children.push(id);

        assert_eq!(tree.principal_variation(), vec![card(Rank::Ten), follow]);
        assert!(MCTSTree::new(MCTSNode::root(state(), TeamId::Team1, legal())).principal_variation().is_empty());
    }

    #[test]
    fn test_tree_iter() {
        let tree = tree_with_means([1, 2, 3]);

        let nodes: Vec<_> = tree.iter().collect();

        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].0, NodeId::new(0));
        assert_eq!(nodes[3].0, NodeId::new(3));
    }

    #[test]
    fn test_tree_serialization() {
        let tree = tree_with_means([5, 6, 7]);

        let json = serde_json::to_string(&tree).unwrap();
        let deserialized: MCTSTree = serde_json::from_str(&json).unwrap();

        assert_eq!(tree.len(), deserialized.len());
        assert_eq!(deserialized.root_node().children.len(), 3);
        assert_eq!(deserialized.get(NodeId::new(2)).mean, 6.0);
    }
}

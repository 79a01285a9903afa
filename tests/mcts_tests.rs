//! MCTS integration tests on dealt hands and mid-turn positions.

use rust_jass::cards::{Card, CardSet, Color, Rank};
use rust_jass::core::{GameRng, PlayerId, PlayerMap};
use rust_jass::mcts::{Determinization, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, SelectionPolicy};
use rust_jass::rules::{Score, TurnState};

fn deal(seed: u64) -> PlayerMap<CardSet> {
    let mut deck: Vec<Card> = Card::all().collect();
    GameRng::new(seed).shuffle(&mut deck);
    PlayerMap::new(|id| CardSet::of(deck[id.index() * 9..(id.index() + 1) * 9].iter().copied()))
}

/// Play `cards` cards of a dealt turn with the lowest legal card each time,
/// collecting full tricks. Returns the state and the remaining hands.
fn advance(seed: u64, trump: Color, cards: usize) -> (TurnState, PlayerMap<CardSet>) {
    let mut hands = deal(seed);
    let mut state = TurnState::initial(trump, Score::INITIAL, PlayerId::Player1);
    for _ in 0..cards {
        let player = state.next_player().unwrap();
        let card = state.trick().playable_cards(hands[player]).unwrap().get(0);
        hands[player] = hands[player].remove(card);
        state = state.with_new_card_played(card).unwrap();
        if state.trick().is_full() {
            state = state.with_trick_collected().unwrap();
        }
    }
    (state, hands)
}

fn config(iterations: u32) -> MCTSConfig {
    MCTSConfig::default().with_iterations(iterations).with_seed(42)
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_plays_legal_card_everywhere() {
    for cards in [0, 1, 2, 3, 5, 13, 22, 30, 34, 35] {
        let (state, hands) = advance(cards as u64, Color::ALL[cards % 4], cards);
        let player = state.next_player().unwrap();
        let mut search = MCTSSearch::new(player, config(200)).unwrap();

        let card = search.card_to_play(&state, hands[player]).unwrap();
        let legal = state.trick().playable_cards(hands[player]).unwrap();
        assert!(legal.contains(card), "after {cards} cards: {card} not in {legal}");
        assert_eq!(search.stats().iterations, 200);
    }
}

#[test]
fn test_mcts_accepts_full_hand_with_extra_played_cards() {
    // the hand may still list cards that were already played
    let (state, hands) = advance(4, Color::Club, 6);
    let player = state.next_player().unwrap();
    let full_hand = deal(4)[player];
    let mut search = MCTSSearch::new(player, config(100)).unwrap();

    let a = search.card_to_play(&state, full_hand).unwrap();
    let b = search.card_to_play(&state, hands[player]).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let (state, hands) = advance(8, Color::Spade, 9);
    let player = state.next_player().unwrap();

    let mut search1 = MCTSSearch::new(player, config(300)).unwrap();
    let mut search2 = MCTSSearch::new(player, config(300)).unwrap();

    let card1 = search1.card_to_play(&state, hands[player]).unwrap();
    let card2 = search2.card_to_play(&state, hands[player]).unwrap();
    assert_eq!(card1, card2, "Same seed should produce same card");
    assert_eq!(search1.tree().len(), search2.tree().len());

    // repeated searches on one instance start from scratch
    let again = search1.card_to_play(&state, hands[player]).unwrap();
    assert_eq!(again, card1);
}

#[test]
fn test_mcts_different_seeds_complete() {
    let (state, hands) = advance(8, Color::Spade, 0);
    let player = state.next_player().unwrap();

    let mut search1 = MCTSSearch::new(player, config(500).with_seed(111)).unwrap();
    let mut search2 = MCTSSearch::new(player, config(500).with_seed(222)).unwrap();
    search1.card_to_play(&state, hands[player]).unwrap();
    search2.card_to_play(&state, hands[player]).unwrap();

    assert_eq!(search1.stats().iterations, 500);
    assert_eq!(search2.stats().iterations, 500);
    assert_eq!(search1.tree().root_node().visits, 500);
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_all_trumps_take_every_trick() {
    let hearts = CardSet::ALL_CARDS.subset_of_color(Color::Heart);
    let mut search = MCTSSearch::new(PlayerId::Player2, config(300)).unwrap();

    let state = TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player2);
    assert_eq!(search.evaluate(&state, hearts).unwrap(), 257.0);

    assert_eq!(search.choose_trump(hearts, true).unwrap(), Some(Color::Heart));
}

#[test]
fn test_last_card_is_forced() {
    let (state, hands) = advance(21, Color::Diamond, 32);
    let player = state.next_player().unwrap();
    assert_eq!(hands[player].size(), 1);

    let mut search = MCTSSearch::new(player, config(9)).unwrap();
    assert_eq!(search.card_to_play(&state, hands[player]).unwrap(), hands[player].get(0));
    assert_eq!(search.tree().root_node().children.len(), 1);
}

#[test]
fn test_takes_trick_with_trump_jack_when_last() {
    // Player 4 sits last in the first trick, can follow hearts with
    // the trump jack and win 20 + 11 + 10 + 4 at no risk
    let hand = CardSet::of([
        Card::of(Color::Heart, Rank::Jack),
        Card::of(Color::Heart, Rank::Six),
        Card::of(Color::Spade, Rank::Six),
        Card::of(Color::Spade, Rank::Seven),
        Card::of(Color::Spade, Rank::Eight),
        Card::of(Color::Club, Rank::Six),
        Card::of(Color::Club, Rank::Seven),
        Card::of(Color::Diamond, Rank::Six),
        Card::of(Color::Diamond, Rank::Seven),
    ]);
    let state = [
        Card::of(Color::Heart, Rank::Ace),
        Card::of(Color::Heart, Rank::Ten),
        Card::of(Color::Heart, Rank::King),
    ]
    .into_iter()
    .fold(TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player1), |s, c| {
        s.with_new_card_played(c).unwrap()
    });

    let mut search = MCTSSearch::new(PlayerId::Player4, config(2_000)).unwrap();
    let card = search.card_to_play(&state, hand).unwrap();
    assert_eq!(card, Card::of(Color::Heart, Rank::Jack));
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_out_of_turn_and_terminal() {
    let (state, hands) = advance(2, Color::Club, 0);
    let player = state.next_player().unwrap();
    let other = player.offset(1);
    let mut search = MCTSSearch::new(other, config(50)).unwrap();
    assert!(search.card_to_play(&state, hands[other]).is_err());

    let (terminal, _) = advance(2, Color::Club, 36);
    assert!(terminal.is_terminal());
    assert!(search.card_to_play(&terminal, CardSet::EMPTY).is_err());
    assert!(search.evaluate(&terminal, CardSet::EMPTY).is_err());
}

#[test]
fn test_evaluate_only_on_own_turn() {
    let hearts = CardSet::ALL_CARDS.subset_of_color(Color::Heart);
    let mut search = MCTSSearch::new(PlayerId::Player1, config(2_000)).unwrap();

    let own_lead = TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player1);
    assert_eq!(search.evaluate(&own_lead, hearts).unwrap(), 257.0);

    let opponent_lead = TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player2);
    assert!(search.evaluate(&opponent_lead, hearts).is_err());
    // the tree of the last successful search is kept
    assert_eq!(search.tree().root_node().visits, 2_000);
}

#[test]
fn test_hand_must_match_cards_left() {
    let (state, hands) = advance(6, Color::Heart, 10);
    let player = state.next_player().unwrap();
    let mut search = MCTSSearch::new(player, config(50)).unwrap();

    let short = hands[player].remove(hands[player].get(0));
    assert!(search.card_to_play(&state, short).is_err());

    let long = hands[player].add(hands[player.offset(1)].get(0));
    assert!(search.card_to_play(&state, long).is_err());
}

// =============================================================================
// Policy Tests
// =============================================================================

/// Always descends into the first child.
struct FirstChild;

impl SelectionPolicy for FirstChild {
    fn select(&self, _tree: &MCTSTree, _node: &MCTSNode, _exploration: f64) -> usize {
        0
    }
}

#[test]
fn test_custom_selection_policy() {
    let (state, hands) = advance(13, Color::Spade, 0);
    let player = state.next_player().unwrap();
    let mut search = MCTSSearch::new(player, config(100)).unwrap().with_selection(FirstChild);
    let card = search.card_to_play(&state, hands[player]).unwrap();
    assert!(hands[player].contains(card));

    // once the root is expanded, every descent goes through the first child
    let root = search.tree().root_node();
    let legal = Determinization::new(player, hands[player]).playable(&state).size() as u32;
    let first = search.tree().get(root.children[0]);
    assert_eq!(first.visits, 1 + 100 - legal);
    assert_eq!(first.team, player.team());
}

#[test]
fn test_tree_stats_after_search() {
    let (state, hands) = advance(17, Color::Diamond, 4);
    let player = state.next_player().unwrap();
    let mut search = MCTSSearch::new(player, config(400)).unwrap();
    search.card_to_play(&state, hands[player]).unwrap();

    let stats = search.tree().stats();
    assert_eq!(stats.node_count, search.tree().len());
    assert_eq!(stats.node_count, search.stats().nodes_expanded as usize + 1);
    assert!(stats.max_depth > 1);
    assert!(stats.branching_factor() > 0.0);
    assert!(stats.expansion_ratio() > 0.0 && stats.expansion_ratio() <= 1.0);

    let team_points = search.tree().root_node().mean;
    assert!((0.0..=257.0).contains(&team_points));
    assert_eq!(search.tree().root_node().team, player.team());
}

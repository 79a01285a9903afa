criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        playing_random_turn,
        searching_opening_card,
        searching_mid_turn_card,
        choosing_trump,
}

use rust_jass::cards::{Card, CardSet, Color};
use rust_jass::core::{GameRng, PlayerId, PlayerMap};
use rust_jass::mcts::{Determinization, MCTSConfig, MCTSSearch, RandomPlayout, SimulationPolicy};
use rust_jass::rules::{Score, TurnState};

fn deal(seed: u64) -> PlayerMap<CardSet> {
    let mut deck: Vec<Card> = Card::all().collect();
    GameRng::new(seed).shuffle(&mut deck);
    PlayerMap::new(|id| CardSet::of(deck[id.index() * 9..(id.index() + 1) * 9].iter().copied()))
}

fn hand(seed: u64) -> CardSet {
    deal(seed)[PlayerId::Player1]
}

fn playing_random_turn(c: &mut criterion::Criterion) {
    let moves = Determinization::new(PlayerId::Player1, hand(1));
    let state = TurnState::initial(Color::Heart, Score::INITIAL, PlayerId::Player1);
    let mut rng = GameRng::new(1);
    c.bench_function("play out a random turn", |b| {
        b.iter(|| RandomPlayout.simulate(state, &moves, &mut rng))
    });
}

fn searching_opening_card(c: &mut criterion::Criterion) {
    let hand = hand(2);
    let state = TurnState::initial(Color::Spade, Score::INITIAL, PlayerId::Player1);
    let mut search = MCTSSearch::new(PlayerId::Player1, MCTSConfig::default()).unwrap();
    c.bench_function("search the opening card (10k iterations)", |b| {
        b.iter(|| search.card_to_play(&state, hand).unwrap())
    });
}

fn searching_mid_turn_card(c: &mut criterion::Criterion) {
    let mut hands = deal(3);
    let mut state = TurnState::initial(Color::Club, Score::INITIAL, PlayerId::Player2);
    for _ in 0..14 {
        let player = state.next_player().unwrap();
        let card = state.trick().playable_cards(hands[player]).unwrap().get(0);
        hands[player] = hands[player].remove(card);
        state = state.with_new_card_played(card).unwrap();
        if state.trick().is_full() {
            state = state.with_trick_collected().unwrap();
        }
    }
    let player = state.next_player().unwrap();
    let mut search = MCTSSearch::new(player, MCTSConfig::default()).unwrap();
    c.bench_function("search a mid-turn card (10k iterations)", |b| {
        b.iter(|| search.card_to_play(&state, hands[player]).unwrap())
    });
}

fn choosing_trump(c: &mut criterion::Criterion) {
    let hand = hand(4);
    let config = MCTSConfig::default().with_iterations(2_500);
    let mut search = MCTSSearch::new(PlayerId::Player3, config).unwrap();
    c.bench_function("choose trump (4 x 2.5k iterations)", |b| {
        b.iter(|| search.choose_trump(hand, true).unwrap())
    });
}

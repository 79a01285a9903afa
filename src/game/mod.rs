//! Match orchestration: dealing, trump selection, trick play and scoring
//! for four seated [`Player`]s.

use log::{info, trace, warn};

use crate::cards::{Card, CardSet, Color, Rank};
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap, Result, TeamId};
use crate::players::Player;
use crate::rules::{Score, TurnState, HAND_SIZE};

/// A game of Jass played until one team reaches the winning points.
///
/// The game advances one trick at a time so callers (a UI, a server loop)
/// can interleave their own work between tricks.
pub struct JassGame {
    config: GameConfig,
    players: PlayerMap<Box<dyn Player>>,
    rng: GameRng,
    /// Draws replacements for illegal choices; dealing uses `rng` only.
    fallback_rng: GameRng,
    deck: Vec<Card>,
    hands: PlayerMap<CardSet>,
    trump_chooser: PlayerId,
    first_player: PlayerId,
    turn_state: TurnState,
    turn: u32,
    winner: Option<TeamId>,
}

impl JassGame {
    /// Seat the players, deal the first hands and run the first trump
    /// selection. The holder of the seven of diamonds leads and chooses
    /// trump in the first turn.
    pub fn new(config: GameConfig, mut players: PlayerMap<Box<dyn Player>>, names: PlayerMap<String>) -> Result<Self> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let fallback_rng = rng.fork();
        for (id, player) in players.iter_mut() {
            player.set_players(id, &names);
        }

        let mut game = Self {
            config,
            players,
            rng,
            fallback_rng,
            deck: Card::all().collect(),
            hands: PlayerMap::with_value(CardSet::EMPTY),
            trump_chooser: PlayerId::Player1,
            first_player: PlayerId::Player1,
            turn_state: TurnState::initial(Color::Spade, Score::INITIAL, PlayerId::Player1),
            turn: 0,
            winner: None,
        };
        game.deal();

        let seven_of_diamonds = Card::of(Color::Diamond, Rank::Seven);
        game.first_player = PlayerId::ALL
            .into_iter()
            .find(|&p| game.hands[p].contains(seven_of_diamonds))
            .unwrap_or(PlayerId::Player1);
        game.trump_chooser = game.first_player;
        game.start_turn(Score::INITIAL)?;
        Ok(game)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Team that reached the winning points, once the game is over.
    #[must_use]
    pub fn winning_team(&self) -> Option<TeamId> {
        self.winner
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn_state
    }

    /// Cards `player` currently holds.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> CardSet {
        self.hands[player]
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Collect the last played trick, if any, then play the next one.
    ///
    /// Collecting may end the game, in which case no further cards are
    /// played; calling this after the game is over does nothing. A card that
    /// a player is not allowed to play is replaced by a random legal one.
    pub fn advance_to_end_of_next_trick(&mut self) -> Result<()> {
        if self.is_game_over() {
            return Ok(());
        }

        if self.turn_state.trick().is_full() {
            let trick = self.turn_state.trick();
            self.turn_state = self.turn_state.with_trick_collected()?;
            let score = self.turn_state.score();
            trace!("trick {} {trick} collected, score {score}", trick.index());
            self.notify(|p| p.update_score(score));

            if let Some(team) = TeamId::ALL
                .into_iter()
                .find(|&t| score.total_points(t) >= self.config.winning_points)
            {
                info!(
                    "{team} wins with {} to {}",
                    score.total_points(team),
                    score.total_points(team.other())
                );
                self.winner = Some(team);
                self.notify(|p| p.set_winning_team(team));
                return Ok(());
            }

            if self.turn_state.is_terminal() {
                self.deal();
                self.first_player = self.first_player.offset(1);
                self.start_turn(score.next_turn())?;
            } else {
                let trick = self.turn_state.trick();
                self.notify(|p| p.update_trick(trick));
            }
        }

        for _ in 0..PlayerId::COUNT {
            self.play_one_card()?;
        }
        Ok(())
    }

    fn play_one_card(&mut self) -> Result<()> {
        let id = self.turn_state.next_player()?;
        let hand = self.hands[id];
        let playable = self.turn_state.trick().playable_cards(hand)?;

        let mut card = self.players[id].card_to_play(&self.turn_state, hand)?;
        if !playable.contains(card) {
            let replacement = playable.get(self.fallback_rng.gen_index(playable.size()));
            warn!("{id} tried to play {card} in {}; playing {replacement} instead", self.turn_state.trick());
            card = replacement;
        }

        let hand = hand.remove(card);
        self.hands[id] = hand;
        self.players[id].update_hand(hand);
        self.turn_state = self.turn_state.with_new_card_played(card)?;
        let trick = self.turn_state.trick();
        self.notify(|p| p.update_trick(trick));
        Ok(())
    }

    /// Shuffle the deck and hand out 9 cards to each seat.
    fn deal(&mut self) {
        self.rng.shuffle(&mut self.deck);
        for (i, chunk) in self.deck.chunks(HAND_SIZE).enumerate() {
            let id = PlayerId::ALL[i];
            let hand = CardSet::of(chunk.iter().copied());
            self.hands[id] = hand;
            self.players[id].update_hand(hand);
        }
    }

    /// Ask for trump, letting the chooser pass to their partner once.
    fn start_turn(&mut self, score: Score) -> Result<()> {
        let chooser = self.trump_chooser;
        let trump = match self.players[chooser].choose_trump(self.hands[chooser], true)? {
            Some(trump) => trump,
            None => {
                let partner = chooser.offset(2);
                trace!("{chooser} passes to {partner}");
                match self.players[partner].choose_trump(self.hands[partner], false)? {
                    Some(trump) => trump,
                    None => {
                        let forced = Color::ALL[self.fallback_rng.gen_index(Color::COUNT)];
                        warn!("{partner} passed although passing was not allowed; trump is {forced}");
                        forced
                    }
                }
            }
        };
        self.trump_chooser = chooser.offset(1);
        self.turn += 1;

        self.turn_state = TurnState::initial(trump, score, self.first_player);
        info!("turn {} starts: trump {trump}, {} leads, score {score}", self.turn, self.first_player);
        let trick = self.turn_state.trick();
        self.notify(|p| {
            p.set_trump(trump);
            p.update_score(score);
            p.update_trick(trick);
        });
        Ok(())
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn Player)) {
        for player in self.players.values_mut() {
            f(player.as_mut());
        }
    }
}

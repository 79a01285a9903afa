//! A trick packed into a `u32`.
//!
//! ## Packing
//!
//! ```text
//!  31-30  29-28   27-24   23-18  17-12  11-6   5-0
//! [trump][first][index ][card3][card2][card1][card0]
//! ```
//!
//! Empty slots hold the invalid card `0b111111`; slots fill from `card0`
//! upwards with no gaps. The first player is the seat that leads; the seat
//! in slot `i` is `first + i`.

use serde::{Deserialize, Serialize};

use super::{LAST_TRICK_ADDITIONAL_POINTS, TRICKS_PER_TURN};
use crate::bits::bits32;
use crate::cards::card::INVALID_PACKED;
use crate::cards::{Card, CardSet, Color, Rank};
use crate::core::{JassError, PlayerId, Result};

const CARD_BITS: u32 = 6;
const SLOTS: usize = PlayerId::COUNT;
const SLOTS_BITS: u32 = CARD_BITS * SLOTS as u32;
const INDEX_START: u32 = SLOTS_BITS;
const INDEX_BITS: u32 = 4;
const PLAYER_START: u32 = INDEX_START + INDEX_BITS;
const PLAYER_BITS: u32 = 2;
const TRUMP_START: u32 = PLAYER_START + PLAYER_BITS;
const TRUMP_BITS: u32 = 2;

/// All four slots empty.
const EMPTY_SLOTS: u32 = (1 << SLOTS_BITS) - 1;

/// One round of up to four cards, with its trump, leader and position in
/// the turn.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Trick(u32);

impl Trick {
    /// Marker returned by [`Trick::next_empty`] after the last trick of a turn.
    pub const INVALID: Trick = Trick(u32::MAX);

    /// The empty first trick of a turn.
    #[must_use]
    pub fn first_empty(trump: Color, first_player: PlayerId) -> Self {
        Self::empty(trump, first_player, 0)
    }

    fn empty(trump: Color, first_player: PlayerId, index: usize) -> Self {
        Self(bits32::pack(&[
            (EMPTY_SLOTS, SLOTS_BITS),
            (index as u32, INDEX_BITS),
            (first_player.index() as u32, PLAYER_BITS),
            (trump.index() as u32, TRUMP_BITS),
        ]))
    }

    /// Decode a packed trick received from outside the crate.
    pub fn of_packed(packed: u32) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed))
        } else {
            Err(JassError::packed("trick", packed))
        }
    }

    /// Whether `packed` is a legal trick: index below 9, filled slots
    /// holding real cards, and no filled slot after an empty one.
    #[must_use]
    pub fn is_valid_packed(packed: u32) -> bool {
        let trick = Self(packed);
        if trick.index() >= TRICKS_PER_TURN {
            return false;
        }
        let size = trick.size();
        (0..SLOTS).all(|i| {
            let slot = trick.slot(i);
            if i < size {
                Card::is_valid_packed(slot)
            } else {
                slot == INVALID_PACKED
            }
        })
    }

    /// The packed encoding.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Whether this is the end-of-turn marker.
    #[inline]
    #[must_use]
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    #[inline]
    fn slot(self, i: usize) -> u32 {
        bits32::extract(self.0, CARD_BITS * i as u32, CARD_BITS)
    }

    /// The empty trick that follows this full one, led by this trick's
    /// winner, or [`Trick::INVALID`] if this was the last trick of the turn.
    pub fn next_empty(self) -> Result<Self> {
        if !self.is_full() {
            return Err(JassError::InvalidState("next trick requested before this one is full"));
        }
        Ok(self.next_empty_unchecked())
    }

    pub(crate) fn next_empty_unchecked(self) -> Self {
        if self.is_last() {
            Self::INVALID
        } else {
            Self::empty(self.trump(), self.winning_player_unchecked(), self.index() + 1)
        }
    }

    /// Whether this is the 9th trick of the turn.
    #[must_use]
    pub fn is_last(self) -> bool {
        self.index() == TRICKS_PER_TURN - 1
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.size() == 0
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.size() == SLOTS
    }

    /// Number of cards played so far.
    #[must_use]
    pub fn size(self) -> usize {
        (0..SLOTS).find(|&i| self.slot(i) == INVALID_PACKED).unwrap_or(SLOTS)
    }

    #[must_use]
    pub fn trump(self) -> Color {
        Color::ALL[bits32::extract(self.0, TRUMP_START, TRUMP_BITS) as usize]
    }

    /// Seat playing in slot `index`.
    ///
    /// # Panics
    ///
    /// If `index >= 4`.
    #[must_use]
    pub fn player(self, index: usize) -> PlayerId {
        assert!(index < SLOTS, "player index {index} out of range");
        let first = bits32::extract(self.0, PLAYER_START, PLAYER_BITS) as usize;
        PlayerId::ALL[first].offset(index)
    }

    /// Position of this trick in the turn (0-8).
    #[must_use]
    pub fn index(self) -> usize {
        bits32::extract(self.0, INDEX_START, INDEX_BITS) as usize
    }

    /// Card in slot `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.size()`.
    #[must_use]
    pub fn card(self, index: usize) -> Card {
        assert!(index < self.size(), "card index {index} out of range for trick of size {}", self.size());
        Card::from_packed_unchecked(self.slot(index))
    }

    /// This trick with `card` placed in the next free slot.
    pub fn with_added_card(self, card: Card) -> Result<Self> {
        if self.is_full() {
            return Err(JassError::InvalidState("card added to a full trick"));
        }
        Ok(self.with_added_card_unchecked(card))
    }

    pub(crate) fn with_added_card_unchecked(self, card: Card) -> Self {
        let shift = CARD_BITS * self.size() as u32;
        Self(self.0 & !bits32::mask(shift, CARD_BITS) | card.packed() << shift)
    }

    /// Color of the first card played.
    pub fn base_color(self) -> Result<Color> {
        if self.is_empty() {
            return Err(JassError::InvalidState("base color of an empty trick"));
        }
        Ok(self.card(0).color())
    }

    /// Cards of `hand` that may legally be played next.
    pub fn playable_cards(self, hand: CardSet) -> Result<CardSet> {
        if self.is_full() {
            return Err(JassError::InvalidState("playable cards of a full trick"));
        }
        Ok(self.playable_cards_unchecked(hand))
    }

    pub(crate) fn playable_cards_unchecked(self, hand: CardSet) -> CardSet {
        if self.is_empty() || hand.size() == 1 {
            return hand;
        }
        let base = self.card(0).color();
        let trump = self.trump();
        let trumps = hand.subset_of_color(trump);
        let trump_jack = CardSet::EMPTY.add(Card::of(trump, Rank::Jack));

        let mut playable = hand.subset_of_color(base);
        // the trump jack alone never forces following a trump lead
        if playable.is_empty() || playable == trump_jack {
            playable = playable.union(hand.difference(trumps));
        }
        if base == trump {
            return playable;
        }

        let winning = self.card(self.winning_position());
        if winning.color() == trump {
            playable = playable.union(CardSet::trump_above(winning).intersection(hand));
        } else {
            playable = playable.union(trumps);
        }

        if playable.is_empty() {
            hand
        } else {
            playable
        }
    }

    /// Points of the cards played, plus the last-trick bonus on the 9th trick.
    #[must_use]
    pub fn points(self) -> u32 {
        let trump = self.trump();
        let cards: u32 = (0..self.size()).map(|i| self.card(i).points(trump)).sum();
        if self.is_last() {
            cards + LAST_TRICK_ADDITIONAL_POINTS
        } else {
            cards
        }
    }

    /// Seat currently winning the trick.
    pub fn winning_player(self) -> Result<PlayerId> {
        if self.is_empty() {
            return Err(JassError::InvalidState("winning player of an empty trick"));
        }
        Ok(self.winning_player_unchecked())
    }

    pub(crate) fn winning_player_unchecked(self) -> PlayerId {
        self.player(self.winning_position())
    }

    fn winning_position(self) -> usize {
        let trump = self.trump();
        let mut best = 0;
        let mut best_card = self.card(0);
        for i in 1..self.size() {
            let card = self.card(i);
            if card.is_better(trump, best_card) {
                best = i;
                best_card = card;
            }
        }
        best
    }
}

impl TryFrom<u32> for Trick {
    type Error = JassError;

    fn try_from(packed: u32) -> Result<Self> {
        if packed == Self::INVALID.0 {
            return Ok(Self::INVALID);
        }
        Self::of_packed(packed)
    }
}

impl From<Trick> for u32 {
    fn from(trick: Trick) -> Self {
        trick.0
    }
}

impl std::fmt::Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for i in 0..self.size() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", self.card(i))?;
        }
        f.write_str("}")
    }
}

impl std::fmt::Debug for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            return f.write_str("Trick(INVALID)");
        }
        write!(f, "Trick(#{} trump={} first={} {self})", self.index(), self.trump(), self.player(0))
    }
}

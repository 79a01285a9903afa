//! Sets of cards packed into a single `u64`.
//!
//! Each color owns a 16-bit quadrant; bit `16 * color + rank` is set when the
//! card is in the set, so a card's bit index equals its packed value. Only 9
//! bits of each quadrant are ever used, the top 7 stay zero. Keeping whole
//! quadrants lets per-color operations (color subsets, "trumps above") be a
//! mask or a shift.

use serde::{Deserialize, Serialize};

use super::card::{Card, Color, Rank};
use crate::bits::bits64;
use crate::core::{JassError, Result};

const QUADRANT_BITS: u32 = 16;
const RESERVED_BITS: u64 = 0xfe00_fe00_fe00_fe00;

/// For each rank, the trump ranks that beat it, as a quadrant-relative mask.
const TRUMP_ABOVE: [u64; 9] = [
    0b1_1111_1110, // 6
    0b1_1111_1100, // 7
    0b1_1111_1000, // 8
    0b0_0010_0000, // 9
    0b1_1110_1000, // 10
    0b0_0000_0000, // J
    0b1_1010_1000, // Q
    0b1_0010_1000, // K
    0b0_0010_1000, // A
];

/// An immutable set of distinct cards.
///
/// ```
/// use rust_jass::cards::{Card, CardSet, Color, Rank};
///
/// let six = Card::of(Color::Heart, Rank::Six);
/// let ace = Card::of(Color::Club, Rank::Ace);
/// let hand = CardSet::EMPTY.add(six).add(ace);
///
/// assert_eq!(hand.size(), 2);
/// assert!(hand.contains(ace));
/// assert_eq!(hand.subset_of_color(Color::Heart).get(0), six);
/// assert_eq!(hand.to_string(), "{\u{2661}6,\u{2663}A}");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// All 36 cards.
    pub const ALL_CARDS: CardSet = CardSet(0x01ff_01ff_01ff_01ff);

    /// Set containing the given cards.
    pub fn of(cards: impl IntoIterator<Item = Card>) -> Self {
        cards.into_iter().fold(Self::EMPTY, Self::add)
    }

    /// Decode a packed set received from outside the crate.
    pub fn of_packed(packed: u64) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed))
        } else {
            Err(JassError::packed("card set", packed))
        }
    }

    /// Whether `packed` only uses the 36 card positions.
    #[must_use]
    pub const fn is_valid_packed(packed: u64) -> bool {
        packed & RESERVED_BITS == 0
    }

    /// The packed encoding.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of cards in the set.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The `index`-th card, counting from the lowest packed value.
    ///
    /// # Panics
    ///
    /// If `index >= self.size()`.
    #[must_use]
    pub fn get(self, index: usize) -> Card {
        assert!(index < self.size(), "index {index} out of bounds for card set of size {}", self.size());
        let mut bits = self.0;
        for _ in 0..index {
            bits &= bits - 1;
        }
        Card::from_packed_unchecked(bits.trailing_zeros())
    }

    #[inline]
    #[must_use]
    pub const fn add(self, card: Card) -> Self {
        Self(self.0 | singleton(card))
    }

    #[inline]
    #[must_use]
    pub const fn remove(self, card: Card) -> Self {
        Self(self.0 & !singleton(card))
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & singleton(card) != 0
    }

    /// Every card not in this set.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(self.0 ^ Self::ALL_CARDS.0)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, that: CardSet) -> Self {
        Self(self.0 | that.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, that: CardSet) -> Self {
        Self(self.0 & that.0)
    }

    /// Cards in `self` but not in `that`.
    #[inline]
    #[must_use]
    pub const fn difference(self, that: CardSet) -> Self {
        Self(self.0 & that.complement().0)
    }

    /// Cards of `color` in this set.
    #[inline]
    #[must_use]
    pub fn subset_of_color(self, color: Color) -> Self {
        let quadrant = bits64::mask(color.index() as u32 * QUADRANT_BITS, Rank::COUNT as u32);
        Self(self.0 & quadrant)
    }

    /// Trump cards of `card`'s color that beat it, assuming that color is trump.
    #[inline]
    #[must_use]
    pub fn trump_above(card: Card) -> Self {
        Self(TRUMP_ABOVE[card.rank().index()] << (card.color().index() as u32 * QUADRANT_BITS))
    }

    /// Iterate over the cards in `get` order.
    #[must_use]
    pub fn iter(self) -> Iter {
        Iter { bits: self.0 }
    }
}

#[inline]
const fn singleton(card: Card) -> u64 {
    1 << card.packed()
}

/// Iterator over the cards of a [`CardSet`], lowest packed value first.
#[derive(Clone, Debug)]
pub struct Iter {
    bits: u64,
}

impl Iterator for Iter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.bits == 0 {
            return None;
        }
        let card = Card::from_packed_unchecked(self.bits.trailing_zeros());
        self.bits &= self.bits - 1;
        Some(card)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl TryFrom<u64> for CardSet {
    type Error = JassError;

    fn try_from(packed: u64) -> Result<Self> {
        Self::of_packed(packed)
    }
}

impl From<CardSet> for u64 {
    fn from(set: CardSet) -> Self {
        set.0
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("}")
    }
}

impl std::fmt::Debug for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardSet{self}")
    }
}

//! Colors, ranks and the 6-bit packed card.
//!
//! ## Packing
//!
//! ```text
//!  5 4 3 2 1 0
//! [col][ rank ]
//! ```
//!
//! The rank ordinal sits in the low nibble, the color ordinal in bits 4-5.
//! All six bits set is reserved as the empty-slot marker inside a trick,
//! which is why a packed card is only valid when its rank nibble is at most 8.

use serde::{Deserialize, Serialize};

use crate::bits::bits32;
use crate::core::{JassError, Result};

const RANK_START: u32 = 0;
const RANK_BITS: u32 = 4;
const COLOR_START: u32 = RANK_START + RANK_BITS;
const COLOR_BITS: u32 = 2;

/// Packed value of an empty trick slot.
pub(crate) const INVALID_PACKED: u32 = 0b11_1111;

/// Card color (suit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Color {
    /// All colors in ordinal order.
    pub const ALL: [Color; 4] = [Color::Spade, Color::Heart, Color::Diamond, Color::Club];

    /// Number of colors. Also the wire value for "no trump chosen".
    pub const COUNT: usize = 4;

    /// Color ordinal (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color for an ordinal, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-character suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::Spade => '\u{2660}',
            Color::Heart => '\u{2661}',
            Color::Diamond => '\u{2662}',
            Color::Club => '\u{2663}',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank, in natural (non-trump) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Position of each rank in the trump order 6 < 7 < 8 < 10 < Q < K < A < 9 < J.
const TRUMP_ORDINAL: [u8; 9] = [0, 1, 2, 7, 3, 8, 4, 5, 6];

const TRUMP_POINTS: [u32; 9] = [0, 0, 0, 14, 10, 20, 3, 4, 11];
const PLAIN_POINTS: [u32; 9] = [0, 0, 0, 0, 10, 2, 3, 4, 11];

impl Rank {
    /// All ranks in natural order.
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Number of ranks.
    pub const COUNT: usize = 9;

    /// Rank ordinal in natural order (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank for an ordinal, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this rank when its color is trump.
    #[must_use]
    pub const fn trump_ordinal(self) -> usize {
        TRUMP_ORDINAL[self as usize] as usize
    }

    /// Short display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single card, packed in the low 6 bits of a byte.
///
/// ```
/// use rust_jass::cards::{Card, Color, Rank};
///
/// let jack = Card::of(Color::Heart, Rank::Jack);
/// assert_eq!(jack.packed(), 0b01_0101);
/// assert_eq!(Card::of_packed(jack.packed()).unwrap(), jack);
///
/// // the trump jack beats the trump nine
/// assert!(jack.is_better(Color::Heart, Card::of(Color::Heart, Rank::Nine)));
/// assert_eq!(jack.points(Color::Heart), 20);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Card of the given color and rank.
    #[must_use]
    pub fn of(color: Color, rank: Rank) -> Self {
        let packed = bits32::pack(&[
            (rank.index() as u32, RANK_BITS),
            (color.index() as u32, COLOR_BITS),
        ]);
        Self(packed as u8)
    }

    /// Decode a packed card received from outside the crate.
    pub fn of_packed(packed: u32) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed as u8))
        } else {
            Err(JassError::packed("card", packed))
        }
    }

    /// Decode a packed card produced inside the crate.
    #[inline]
    pub(crate) fn from_packed_unchecked(packed: u32) -> Self {
        debug_assert!(Self::is_valid_packed(packed), "invalid packed card {packed:#x}");
        Self(packed as u8)
    }

    /// Whether `packed` is a legal card encoding.
    #[must_use]
    pub fn is_valid_packed(packed: u32) -> bool {
        let rank = bits32::extract(packed, RANK_START, RANK_BITS);
        let unused = packed & !bits32::mask(0, RANK_BITS + COLOR_BITS);
        (rank as usize) < Rank::COUNT && unused == 0
    }

    /// Every card of the deck, color by color.
    pub fn all() -> impl Iterator<Item = Card> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Rank::ALL.into_iter().map(move |rank| Card::of(color, rank)))
    }

    /// The packed encoding.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0 as u32
    }

    /// This card's color.
    #[inline]
    #[must_use]
    pub fn color(self) -> Color {
        Color::ALL[bits32::extract(self.packed(), COLOR_START, COLOR_BITS) as usize]
    }

    /// This card's rank.
    #[inline]
    #[must_use]
    pub fn rank(self) -> Rank {
        Rank::ALL[bits32::extract(self.packed(), RANK_START, RANK_BITS) as usize]
    }

    /// Whether this card beats `that` when `trump` is the trump color.
    ///
    /// Cards of two different non-trump colors do not beat each other; the
    /// trick resolves that case by play order.
    #[must_use]
    pub fn is_better(self, trump: Color, that: Card) -> bool {
        let (color, that_color) = (self.color(), that.color());
        if color == trump {
            that_color != trump || self.rank().trump_ordinal() > that.rank().trump_ordinal()
        } else {
            color == that_color && self.rank() > that.rank()
        }
    }

    /// Points this card is worth when `trump` is the trump color.
    #[must_use]
    pub fn points(self, trump: Color) -> u32 {
        let rank = self.rank().index();
        if self.color() == trump {
            TRUMP_POINTS[rank]
        } else {
            PLAIN_POINTS[rank]
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = JassError;

    fn try_from(packed: u8) -> Result<Self> {
        Self::of_packed(u32::from(packed))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color(), self.rank())
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({self})")
    }
}

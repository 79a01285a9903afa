//! Cards and card sets.
//!
//! - `Card`: one of 36 cards, packed in 6 bits
//! - `CardSet`: any subset of the deck, packed in one `u64`

pub mod card;
pub mod card_set;

pub use card::{Card, Color, Rank};
pub use card_set::CardSet;

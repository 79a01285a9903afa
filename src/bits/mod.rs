//! Bit-field helpers for the packed encodings.
//!
//! Every packed value in the crate (card, card set, trick, score) is a
//! sequence of fixed-width fields inside a `u32` or `u64`. These helpers
//! build masks, read fields and assemble words from `(value, width)` pairs,
//! lowest field first.
//!
//! Precondition violations panic: they can only come from a wrong field
//! layout inside this crate, never from caller data.

pub mod bits32;
pub mod bits64;

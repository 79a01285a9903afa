//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors raised at the boundaries of the packed representation and the
/// turn state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JassError {
    /// A packed word from outside the crate is not a legal encoding.
    #[error("invalid packed {kind}: {value:#x}")]
    InvalidPacked {
        /// Which encoding was being decoded (`card`, `trick`, ...).
        kind: &'static str,
        /// The rejected word.
        value: u64,
    },

    /// An operation was called in a state where it is not defined,
    /// e.g. adding a card to a full trick.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A wire-protocol line could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl JassError {
    pub(crate) fn packed(kind: &'static str, value: impl Into<u64>) -> Self {
        Self::InvalidPacked { kind, value: value.into() }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, JassError>;

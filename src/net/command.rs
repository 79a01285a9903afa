use std::fmt;
use std::str::FromStr;

use crate::core::JassError;

/// First field of every protocol line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JassCommand {
    /// Choose trump; expects a reply.
    Chtr,
    /// Seat assignment and player names.
    Plrs,
    /// Trump announced.
    Trmp,
    /// Hand changed.
    Hand,
    /// Trick changed.
    Trck,
    /// Play a card; expects a reply.
    Card,
    /// Score changed.
    Scor,
    /// Game over.
    Winr,
}

impl JassCommand {
    pub const ALL: [JassCommand; 8] = [
        JassCommand::Chtr,
        JassCommand::Plrs,
        JassCommand::Trmp,
        JassCommand::Hand,
        JassCommand::Trck,
        JassCommand::Card,
        JassCommand::Scor,
        JassCommand::Winr,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            JassCommand::Chtr => "CHTR",
            JassCommand::Plrs => "PLRS",
            JassCommand::Trmp => "TRMP",
            JassCommand::Hand => "HAND",
            JassCommand::Trck => "TRCK",
            JassCommand::Card => "CARD",
            JassCommand::Scor => "SCOR",
            JassCommand::Winr => "WINR",
        }
    }

    /// Whether the receiver must answer with a line.
    #[must_use]
    pub const fn expects_reply(self) -> bool {
        matches!(self, JassCommand::Chtr | JassCommand::Card)
    }
}

impl fmt::Display for JassCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JassCommand {
    type Err = JassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| JassError::Protocol(format!("unknown command {s:?}")))
    }
}

//! Seat and team identification, and per-seat data storage.
//!
//! ## PlayerId
//!
//! One of the four seats at the table. Seats 1 and 3 form team 1, seats 2
//! and 4 form team 2; play proceeds in seat order.
//!
//! ## PlayerMap
//!
//! Fixed-size per-seat storage backed by `[T; 4]`, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the four seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    Player1,
    Player2,
    Player3,
    Player4,
}

impl PlayerId {
    /// All seats in play order.
    pub const ALL: [PlayerId; 4] = [
        PlayerId::Player1,
        PlayerId::Player2,
        PlayerId::Player3,
        PlayerId::Player4,
    ];

    /// Number of seats.
    pub const COUNT: usize = 4;

    /// Seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Seat for a 0-based index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Seat `offset` places after this one, wrapping around the table.
    ///
    /// ```
    /// use rust_jass::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::Player4.offset(1), PlayerId::Player1);
    /// assert_eq!(PlayerId::Player2.offset(2), PlayerId::Player4);
    /// ```
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        Self::ALL[(self.index() + offset) % Self::COUNT]
    }

    /// Team this seat plays for.
    #[must_use]
    pub const fn team(self) -> TeamId {
        match self {
            PlayerId::Player1 | PlayerId::Player3 => TeamId::Team1,
            PlayerId::Player2 | PlayerId::Player4 => TeamId::Team2,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// One of the two partnerships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamId {
    Team1,
    Team2,
}

impl TeamId {
    /// Both teams.
    pub const ALL: [TeamId; 2] = [TeamId::Team1, TeamId::Team2];

    /// Number of teams.
    pub const COUNT: usize = 2;

    /// Team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Team for a 0-based index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            TeamId::Team1 => TeamId::Team2,
            TeamId::Team2 => TeamId::Team1,
        }
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.index() + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_jass::core::{PlayerId, PlayerMap};
///
/// let mut names = PlayerMap::new(|p| format!("seat {}", p.index()));
/// assert_eq!(names[PlayerId::Player2], "seat 1");
///
/// names[PlayerId::Player2] = "Bob".to_string();
/// assert_eq!(names[PlayerId::Player2], "Bob");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 4],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over the values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

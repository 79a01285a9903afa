//! Both teams' scores packed into a `u64`.
//!
//! ## Packing
//!
//! Team 1 uses the low 32 bits, team 2 the high 32 bits, each laid out as:
//!
//! ```text
//!  31-24   23-13        12-4         3-0
//! [ 0  ][game points][turn points][tricks]
//! ```

use serde::{Deserialize, Serialize};

use super::{MATCH_ADDITIONAL_POINTS, TRICKS_PER_TURN};
use crate::bits::bits64;
use crate::core::{JassError, Result, TeamId};

const TEAM_BITS: u32 = 32;
const TRICKS_START: u32 = 0;
const TRICKS_BITS: u32 = 4;
const TURN_POINTS_START: u32 = TRICKS_START + TRICKS_BITS;
const TURN_POINTS_BITS: u32 = 9;
const GAME_POINTS_START: u32 = TURN_POINTS_START + TURN_POINTS_BITS;
const GAME_POINTS_BITS: u32 = 11;
const USED_BITS: u32 = GAME_POINTS_START + GAME_POINTS_BITS;

const MAX_TURN_POINTS: u32 = 257;
const MAX_GAME_POINTS: u32 = 2000;

/// Per-team (tricks, turn points, game points) triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TeamScore {
    tricks: u32,
    turn_points: u32,
    game_points: u32,
}

impl TeamScore {
    fn is_valid(self) -> bool {
        self.tricks as usize <= TRICKS_PER_TURN
            && self.turn_points <= MAX_TURN_POINTS
            && self.game_points <= MAX_GAME_POINTS
    }
}

/// Scores of both teams for the current turn and the match so far.
///
/// ```
/// use rust_jass::core::TeamId;
/// use rust_jass::rules::Score;
///
/// let score = Score::INITIAL
///     .with_additional_trick(TeamId::Team1, 21)
///     .with_additional_trick(TeamId::Team2, 13);
/// assert_eq!(score.turn_points(TeamId::Team1), 21);
/// assert_eq!(score.turn_tricks(TeamId::Team2), 1);
///
/// let next = score.next_turn();
/// assert_eq!(next.turn_points(TeamId::Team1), 0);
/// assert_eq!(next.game_points(TeamId::Team1), 21);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Score(u64);

impl Score {
    /// Nothing scored yet.
    pub const INITIAL: Score = Score(0);

    /// Decode a packed score received from outside the crate.
    pub fn of_packed(packed: u64) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed))
        } else {
            Err(JassError::packed("score", packed))
        }
    }

    /// Whether every field of `packed` is within range and the padding is zero.
    #[must_use]
    pub fn is_valid_packed(packed: u64) -> bool {
        let score = Self(packed);
        TeamId::ALL.into_iter().all(|team| {
            let padding = bits64::mask(team_offset(team) + USED_BITS, TEAM_BITS - USED_BITS);
            packed & padding == 0 && score.team(team).is_valid()
        })
    }

    /// The packed encoding.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u64 {
        self.0
    }

    fn field(self, team: TeamId, start: u32, size: u32) -> u32 {
        bits64::extract(self.0, team_offset(team) + start, size) as u32
    }

    fn team(self, team: TeamId) -> TeamScore {
        TeamScore {
            tricks: self.turn_tricks(team),
            turn_points: self.turn_points(team),
            game_points: self.game_points(team),
        }
    }

    fn pack(team1: TeamScore, team2: TeamScore) -> Self {
        debug_assert!(team1.is_valid() && team2.is_valid(), "score out of range: {team1:?} {team2:?}");
        let padding = u64::from(TEAM_BITS - USED_BITS);
        Self(bits64::pack(&[
            (u64::from(team1.tricks), TRICKS_BITS),
            (u64::from(team1.turn_points), TURN_POINTS_BITS),
            (u64::from(team1.game_points), GAME_POINTS_BITS),
            (0, padding as u32),
            (u64::from(team2.tricks), TRICKS_BITS),
            (u64::from(team2.turn_points), TURN_POINTS_BITS),
            (u64::from(team2.game_points), GAME_POINTS_BITS),
        ]))
    }

    /// Tricks won by `team` in the current turn.
    #[must_use]
    pub fn turn_tricks(self, team: TeamId) -> u32 {
        self.field(team, TRICKS_START, TRICKS_BITS)
    }

    /// Points won by `team` in the current turn.
    #[must_use]
    pub fn turn_points(self, team: TeamId) -> u32 {
        self.field(team, TURN_POINTS_START, TURN_POINTS_BITS)
    }

    /// Points won by `team` in completed turns.
    #[must_use]
    pub fn game_points(self, team: TeamId) -> u32 {
        self.field(team, GAME_POINTS_START, GAME_POINTS_BITS)
    }

    /// Game points plus the current turn's points.
    #[must_use]
    pub fn total_points(self, team: TeamId) -> u32 {
        self.game_points(team) + self.turn_points(team)
    }

    /// Score after `winning_team` took a trick worth `trick_points`.
    ///
    /// A team taking its 9th trick of the turn also receives the match bonus.
    ///
    /// # Panics
    ///
    /// If the team already took every trick of the turn, or if its turn
    /// points would exceed 257.
    #[must_use]
    pub fn with_additional_trick(self, winning_team: TeamId, trick_points: u32) -> Self {
        let mut won = self.team(winning_team);
        assert!((won.tricks as usize) < TRICKS_PER_TURN, "{winning_team} already took every trick");
        won.tricks += 1;
        won.turn_points += trick_points;
        if won.tricks as usize == TRICKS_PER_TURN {
            won.turn_points += MATCH_ADDITIONAL_POINTS;
        }
        assert!(
            won.turn_points <= MAX_TURN_POINTS,
            "{winning_team} turn points {} out of range",
            won.turn_points
        );
        let other = self.team(winning_team.other());
        match winning_team {
            TeamId::Team1 => Self::pack(won, other),
            TeamId::Team2 => Self::pack(other, won),
        }
    }

    /// Score at the start of the next turn: turn points are folded into game
    /// points and the per-turn fields reset.
    #[must_use]
    pub fn next_turn(self) -> Self {
        let carry = |team| TeamScore {
            game_points: self.total_points(team),
            ..TeamScore::default()
        };
        Self::pack(carry(TeamId::Team1), carry(TeamId::Team2))
    }
}

const fn team_offset(team: TeamId) -> u32 {
    team.index() as u32 * TEAM_BITS
}

impl TryFrom<u64> for Score {
    type Error = JassError;

    fn try_from(packed: u64) -> Result<Self> {
        Self::of_packed(packed)
    }
}

impl From<Score> for u64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b] = TeamId::ALL.map(|t| self.team(t));
        write!(
            f,
            "({},{},{})/({},{},{})",
            a.tricks, a.turn_points, a.game_points, b.tricks, b.turn_points, b.game_points
        )
    }
}

impl std::fmt::Debug for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score{self}")
    }
}

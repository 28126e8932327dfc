//! # tournament-board-core
//!
//! This crate contains the state behind the tournament board: a fixed 16-entrant
//! double elimination bracket and a league standings table.
//!
//! Important types:
//! - [`MatchId`]: The stable identifier of a match in the bracket (`A1`..`A8`, `B1`..`B4`,
//! `C1`, `C2`, `F1`, `L1`..`L10` and `GF`).
//! - [`Slot`]: One of the two team positions within a [`Match`].
//! - [`Score`]: A non-negative score or the undecided state.
//! - [`Bracket`]: The in-memory [`MatchStore`] holding all matches and the champion.
//! - [`resolve_match_result`]: The pure function mapping a decided match to the
//! [`SlotUpdate`]s of its downstream matches.
//! - [`League`]: The league table with its ranking rules.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls and the [`snapshot`] module.
//!
pub mod bracket;
pub mod match_id;
pub mod resolve;
pub mod standings;
pub mod topology;

#[cfg(feature = "serde")]
pub mod snapshot;

mod utils;

pub use bracket::{apply_update, evaluate, Bracket, Evaluation, MatchStore, SlotWrite};
pub use match_id::{BracketKind, MatchId, Round};
pub use resolve::{resolve_match_result, resolve_named, Resolution, SlotUpdate};
pub use standings::{League, TeamRecord};

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::ops::{Index, IndexMut};
use std::result;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum number of characters in a team name.
pub const MAX_NAME_LENGTH: usize = 30;

/// The maximum number of characters in the champion name.
pub const MAX_CHAMPION_LENGTH: usize = 50;

/// The name of a slot that has no entrant assigned.
pub const TBD: &str = "TBD";

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown match: {0}")]
    UnknownMatch(String),
    #[error("invalid score: {0:?}")]
    InvalidScore(String),
    #[error("invalid slot: {0}, a match only has slots 0 and 1")]
    InvalidSlot(usize),
    #[error("unknown team: {0}")]
    UnknownTeam(usize),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("unknown stat: {0}")]
    UnknownStat(String),
    #[error("invalid form result: {0:?}")]
    InvalidFormResult(String),
    #[error("invalid form position: {0}")]
    InvalidFormPosition(usize),
}

/// Returns `true` if `name` is a sentinel instead of a real entrant name.
///
/// Empty names, `TBD` and names referring to an awaited winner or loser (e.g. `Winner A1`)
/// are placeholders.
pub fn is_placeholder_name(name: &str) -> bool {
    let name = name.trim();

    name.is_empty() || name == TBD || name.contains("Winner") || name.contains("Loser")
}

/// The score of a [`Slot`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Score {
    /// No score was entered yet. Rendered as `-`.
    #[default]
    Undecided,
    Points(u32),
}

impl Score {
    /// Returns the points if the score is decided.
    #[inline]
    pub fn points(&self) -> Option<u32> {
        match self {
            Self::Points(points) => Some(*points),
            Self::Undecided => None,
        }
    }

    /// Returns `true` if the `Score` is [`Undecided`].
    ///
    /// [`Undecided`]: Self::Undecided
    #[inline]
    pub fn is_undecided(&self) -> bool {
        matches!(self, Self::Undecided)
    }
}

impl From<u32> for Score {
    #[inline]
    fn from(points: u32) -> Self {
        Self::Points(points)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undecided => f.write_str("-"),
            Self::Points(points) => Display::fmt(points, f),
        }
    }
}

impl FromStr for Score {
    type Err = Error;

    /// Parses a score. An empty string or `-` is [`Score::Undecided`], everything else must be a
    /// non-negative integer.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "-" {
            return Ok(Self::Undecided);
        }

        s.parse()
            .map(Self::Points)
            .map_err(|_| Error::InvalidScore(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ScoreVisitor;

        impl<'de> serde::de::Visitor<'de> for ScoreVisitor {
            type Value = Score;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or \"-\"")
            }

            fn visit_u64<E>(self, v: u64) -> result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u32::try_from(v)
                    .map(Score::Points)
                    .map_err(|_| E::custom(Error::InvalidScore(v.to_string())))
            }

            fn visit_str<E>(self, v: &str) -> result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ScoreVisitor)
    }
}

/// A team position within a [`Match`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    /// A short label recording where the entrant came from, e.g. `WA1`.
    pub seed: String,
    pub score: Score,
    /// Whether the slot is highlighted as the winner of its match.
    pub winner: bool,
}

impl Slot {
    /// Creates a new `Slot` with an undecided score.
    pub fn new<N, S>(name: N, seed: S) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            seed: seed.into(),
            score: Score::Undecided,
            winner: false,
        }
    }

    /// Returns `true` if the slot is still awaiting an entrant.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_name(&self.name)
    }

    /// Overwrites the entrant of this slot. An undecided score becomes zero.
    pub fn assign(&mut self, name: &str, seed: &str) {
        self.name = name.to_owned();
        self.seed = seed.to_owned();

        if self.score.is_undecided() {
            self.score = Score::Points(0);
        }
    }
}

/// The state of a [`Match`] derived from its scores.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Tied or missing scores. Nothing advances.
    Undecided,
    /// The slot at `winner` has the strictly higher score.
    Decided { winner: usize },
}

impl Outcome {
    /// Returns the index of the winning slot.
    #[inline]
    pub fn winner(&self) -> Option<usize> {
        match self {
            Self::Decided { winner } => Some(*winner),
            Self::Undecided => None,
        }
    }

    /// Returns the index of the losing slot.
    #[inline]
    pub fn loser(&self) -> Option<usize> {
        self.winner().map(|winner| 1 - winner)
    }

    #[inline]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Decided { .. })
    }
}

/// A match of two [`Slot`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub slots: [Slot; 2],
}

impl Match {
    #[inline]
    pub fn new(id: MatchId, slots: [Slot; 2]) -> Self {
        Self { id, slots }
    }

    /// Returns a reference to the slot at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Returns a mutable reference to the slot at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// Returns the index of the first slot still awaiting an entrant.
    #[inline]
    pub fn first_placeholder(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_placeholder)
    }

    /// Returns `true` if both slots hold real entrants.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.first_placeholder().is_none()
    }

    /// Computes the [`Outcome`] from the current scores. Both scores must be decided and
    /// unequal for the match to be decided.
    pub fn outcome(&self) -> Outcome {
        match (self.slots[0].score, self.slots[1].score) {
            (Score::Points(a), Score::Points(b)) if a > b => Outcome::Decided { winner: 0 },
            (Score::Points(a), Score::Points(b)) if b > a => Outcome::Decided { winner: 1 },
            _ => Outcome::Undecided,
        }
    }
}

impl Index<usize> for Match {
    type Output = Slot;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl IndexMut<usize> for Match {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.slots[index]
    }
}

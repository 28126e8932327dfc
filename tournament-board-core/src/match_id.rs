//! # Match identifiers
//!
//! Every match in the bracket has a stable [`MatchId`] drawn from a fixed namespace. The id
//! alone determines the [`BracketKind`] and [`Round`] of a match.
#[cfg(feature = "serde")]
mod serde_impl;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::Error;

/// The identifier of a match.
///
/// The variants are declared in topological order: every match comes after all matches that
/// feed entrants into it. The discriminant doubles as the index into [`MatchId::ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchId {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    B1,
    B2,
    B3,
    B4,
    C1,
    C2,
    F1,
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    L7,
    L8,
    L9,
    L10,
    GF,
}

impl MatchId {
    /// All matches in topological order.
    pub const ALL: [MatchId; 26] = [
        Self::A1,
        Self::A2,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::A6,
        Self::A7,
        Self::A8,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
        Self::C1,
        Self::C2,
        Self::F1,
        Self::L1,
        Self::L2,
        Self::L3,
        Self::L4,
        Self::L5,
        Self::L6,
        Self::L7,
        Self::L8,
        Self::L9,
        Self::L10,
        Self::GF,
    ];

    /// Returns the position of the match in [`MatchId::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::A6 => "A6",
            Self::A7 => "A7",
            Self::A8 => "A8",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::B4 => "B4",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::F1 => "F1",
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
            Self::L5 => "L5",
            Self::L6 => "L6",
            Self::L7 => "L7",
            Self::L8 => "L8",
            Self::L9 => "L9",
            Self::L10 => "L10",
            Self::GF => "GF",
        }
    }

    /// Returns the bracket the match belongs to.
    pub const fn bracket(self) -> BracketKind {
        match self.round() {
            Round::WinnerRound1 | Round::WinnerRound2 | Round::WinnerRound3 => {
                BracketKind::Winner
            }
            Round::LoserRound1 | Round::LoserRound2 | Round::LoserRound3 => BracketKind::Loser,
            Round::WinnerFinal | Round::GrandFinal => BracketKind::Final,
        }
    }

    /// Returns the round the match belongs to.
    pub const fn round(self) -> Round {
        match self {
            Self::A1 | Self::A2 | Self::A3 | Self::A4 | Self::A5 | Self::A6 | Self::A7
            | Self::A8 => Round::WinnerRound1,
            Self::B1 | Self::B2 | Self::B3 | Self::B4 => Round::WinnerRound2,
            Self::C1 | Self::C2 => Round::WinnerRound3,
            Self::F1 => Round::WinnerFinal,
            Self::L1 | Self::L2 | Self::L3 | Self::L4 => Round::LoserRound1,
            Self::L5 | Self::L6 | Self::L7 | Self::L8 => Round::LoserRound2,
            Self::L9 | Self::L10 => Round::LoserRound3,
            Self::GF => Round::GrandFinal,
        }
    }
}

impl Display for MatchId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchId {
    type Err = Error;

    /// Parses a match id. Parsing is case-insensitive and ignores surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownMatch(s.to_owned()))
    }
}

/// The bracket branch of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Winner,
    Loser,
    Final,
}

/// The round of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Round {
    WinnerRound1,
    WinnerRound2,
    WinnerRound3,
    WinnerFinal,
    LoserRound1,
    LoserRound2,
    LoserRound3,
    GrandFinal,
}

impl Round {
    /// Returns the label of the round.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WinnerRound1 => "wb-round1",
            Self::WinnerRound2 => "wb-round2",
            Self::WinnerRound3 => "wb-round3",
            Self::WinnerFinal => "wb-final",
            Self::LoserRound1 => "lb-round1",
            Self::LoserRound2 => "lb-round2",
            Self::LoserRound3 => "lb-round3",
            Self::GrandFinal => "grand-final",
        }
    }
}

impl Display for Round {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{BracketKind, MatchId, Round};
    use crate::Error;

    #[test]
    fn test_match_id_index() {
        for (index, id) in MatchId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), index);
        }
    }

    #[test]
    fn test_match_id_parse() {
        for id in MatchId::ALL {
            assert_eq!(id.as_str().parse::<MatchId>(), Ok(id));
        }

        assert_eq!("gf".parse::<MatchId>(), Ok(MatchId::GF));
        assert_eq!(" l10 ".parse::<MatchId>(), Ok(MatchId::L10));
        assert_eq!(
            "A9".parse::<MatchId>(),
            Err(Error::UnknownMatch(String::from("A9")))
        );
        assert_eq!(
            "L11".parse::<MatchId>(),
            Err(Error::UnknownMatch(String::from("L11")))
        );
        assert!("".parse::<MatchId>().is_err());
        assert!("F2".parse::<MatchId>().is_err());
    }

    #[test]
    fn test_match_id_classification() {
        assert_eq!(MatchId::A3.bracket(), BracketKind::Winner);
        assert_eq!(MatchId::B4.bracket(), BracketKind::Winner);
        assert_eq!(MatchId::C1.bracket(), BracketKind::Winner);
        assert_eq!(MatchId::L7.bracket(), BracketKind::Loser);
        assert_eq!(MatchId::F1.bracket(), BracketKind::Final);
        assert_eq!(MatchId::GF.bracket(), BracketKind::Final);

        assert_eq!(MatchId::A8.round(), Round::WinnerRound1);
        assert_eq!(MatchId::L4.round(), Round::LoserRound1);
        assert_eq!(MatchId::L5.round(), Round::LoserRound2);
        assert_eq!(MatchId::L10.round(), Round::LoserRound3);
        assert_eq!(MatchId::F1.round().as_str(), "wb-final");
        assert_eq!(MatchId::GF.round().as_str(), "grand-final");
    }
}

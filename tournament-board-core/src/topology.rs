//! # Bracket topology
//!
//! The fixed advancement edges of the bracket. The tables are never mutated: winners of winner
//! bracket matches follow [`WINNER_ADVANCE`], winners of loser bracket matches follow
//! [`LOSER_ADVANCE`] and losers of winner bracket rounds one to three follow
//! [`WINNER_TO_LOSER_DROP`]. Losers of loser bracket matches are eliminated.
use crate::MatchId;

use MatchId::*;

/// The match that the winner of a winner bracket match joins.
pub const WINNER_ADVANCE: &[(MatchId, MatchId)] = &[
    (A1, B1),
    (A2, B1),
    (A3, B2),
    (A4, B2),
    (A5, B3),
    (A6, B3),
    (A7, B4),
    (A8, B4),
    (B1, C1),
    (B2, C1),
    (B3, C2),
    (B4, C2),
    (C1, F1),
    (C2, F1),
    (F1, GF),
];

/// The match that the winner of a loser bracket match joins.
pub const LOSER_ADVANCE: &[(MatchId, MatchId)] = &[
    (L1, L5),
    (L2, L6),
    (L3, L7),
    (L4, L8),
    (L5, L9),
    (L6, L9),
    (L7, L10),
    (L8, L10),
    (L9, GF),
    (L10, GF),
];

/// The loser bracket match that receives the loser of a winner bracket match. The winner
/// bracket final has no entry.
pub const WINNER_TO_LOSER_DROP: &[(MatchId, MatchId)] = &[
    (A1, L1),
    (A2, L1),
    (A3, L2),
    (A4, L2),
    (A5, L3),
    (A6, L3),
    (A7, L4),
    (A8, L4),
    (B1, L5),
    (B2, L6),
    (B3, L7),
    (B4, L8),
    (C1, L9),
    (C2, L10),
];

fn lookup(table: &[(MatchId, MatchId)], source: MatchId) -> Option<MatchId> {
    table
        .iter()
        .find(|(key, _)| *key == source)
        .map(|(_, destination)| *destination)
}

/// Returns the match the winner of the winner bracket match `source` joins.
#[inline]
pub fn winner_advance(source: MatchId) -> Option<MatchId> {
    lookup(WINNER_ADVANCE, source)
}

/// Returns the match the winner of the loser bracket match `source` joins.
#[inline]
pub fn loser_advance(source: MatchId) -> Option<MatchId> {
    lookup(LOSER_ADVANCE, source)
}

/// Returns the loser bracket match the loser of `source` drops to.
#[inline]
pub fn loser_drop(source: MatchId) -> Option<MatchId> {
    lookup(WINNER_TO_LOSER_DROP, source)
}

/// Information about the next matches of a match.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NextMatches {
    /// The match the winner advances to.
    pub winner: Option<MatchId>,
    /// The match the loser drops to. `None` if the loser is eliminated.
    pub loser: Option<MatchId>,
}

impl NextMatches {
    /// Returns the [`NextMatches`] of `source`. The grand final has no next matches.
    pub fn of(source: MatchId) -> Self {
        Self {
            winner: winner_advance(source).or_else(|| loser_advance(source)),
            loser: loser_drop(source),
        }
    }
}

/// How an entrant reaches a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feed {
    /// The winner of the source match.
    Winner(MatchId),
    /// The loser of the source match.
    Loser(MatchId),
}

impl Feed {
    /// Returns the placeholder name shown while the entrant is awaited, e.g. `Winner A1`.
    pub fn placeholder_name(&self) -> String {
        match self {
            Self::Winner(id) => format!("Winner {}", id),
            Self::Loser(id) => format!("Loser {}", id),
        }
    }

    /// Returns the placeholder seed shown while the entrant is awaited, e.g. `W-A1`.
    pub fn placeholder_seed(&self) -> String {
        match self {
            Self::Winner(id) => format!("W-{}", id),
            Self::Loser(id) => format!("L-{}", id),
        }
    }
}

/// Returns all edges ending in `destination`, ordered by their source match.
pub fn feeders(destination: MatchId) -> Vec<Feed> {
    MatchId::ALL
        .into_iter()
        .flat_map(|source| {
            let next = NextMatches::of(source);

            let winner = (next.winner == Some(destination)).then_some(Feed::Winner(source));
            let loser = (next.loser == Some(destination)).then_some(Feed::Loser(source));

            [loser, winner].into_iter().flatten()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BracketKind;

    #[test]
    fn test_tables_cover_namespace() {
        for id in MatchId::ALL {
            let winner = winner_advance(id).is_some();
            let loser = loser_advance(id).is_some();
            let drop = loser_drop(id).is_some();

            match id.bracket() {
                BracketKind::Winner => assert!(winner && !loser && drop, "{}", id),
                BracketKind::Loser => assert!(!winner && loser && !drop, "{}", id),
                BracketKind::Final if id == F1 => assert!(winner && !loser && !drop),
                BracketKind::Final => assert!(!winner && !loser && !drop, "{}", id),
            }
        }
    }

    #[test]
    fn test_tables_have_unique_keys() {
        for table in [WINNER_ADVANCE, LOSER_ADVANCE, WINNER_TO_LOSER_DROP] {
            for (index, (key, _)) in table.iter().enumerate() {
                assert!(table[index + 1..].iter().all(|(other, _)| other != key));
            }
        }
    }

    #[test]
    fn test_edges_point_forward() {
        for table in [WINNER_ADVANCE, LOSER_ADVANCE, WINNER_TO_LOSER_DROP] {
            for (source, destination) in table {
                assert!(source < destination, "{} -> {}", source, destination);
            }
        }
    }

    #[test]
    fn test_next_matches() {
        assert_eq!(
            NextMatches::of(A1),
            NextMatches {
                winner: Some(B1),
                loser: Some(L1)
            }
        );
        assert_eq!(
            NextMatches::of(B1),
            NextMatches {
                winner: Some(C1),
                loser: Some(L5)
            }
        );
        assert_eq!(
            NextMatches::of(C2),
            NextMatches {
                winner: Some(F1),
                loser: Some(L10)
            }
        );
        assert_eq!(
            NextMatches::of(F1),
            NextMatches {
                winner: Some(GF),
                loser: None
            }
        );
        assert_eq!(
            NextMatches::of(L9),
            NextMatches {
                winner: Some(GF),
                loser: None
            }
        );
        assert_eq!(NextMatches::of(GF), NextMatches::default());
    }

    #[test]
    fn test_feeders() {
        assert!(feeders(A1).is_empty());
        assert_eq!(feeders(B1), vec![Feed::Winner(A1), Feed::Winner(A2)]);
        assert_eq!(feeders(L1), vec![Feed::Loser(A1), Feed::Loser(A2)]);
        assert_eq!(feeders(L5), vec![Feed::Loser(B1), Feed::Winner(L1)]);
        assert_eq!(
            feeders(L9),
            vec![Feed::Loser(C1), Feed::Winner(L5), Feed::Winner(L6)]
        );
        assert_eq!(
            feeders(GF),
            vec![Feed::Winner(F1), Feed::Winner(L9), Feed::Winner(L10)]
        );

        assert_eq!(Feed::Winner(A1).placeholder_name(), "Winner A1");
        assert_eq!(Feed::Loser(B2).placeholder_seed(), "L-B2");
    }
}

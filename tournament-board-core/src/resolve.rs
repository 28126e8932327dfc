//! # Match resolution
//!
//! [`resolve_match_result`] maps a decided match to the writes required in its downstream
//! matches. It is a pure function of the match id, the two slots and the static
//! [`topology`](crate::topology); applying the writes is left to
//! [`apply_update`](crate::apply_update).
use crate::topology::{loser_advance, loser_drop, winner_advance};
use crate::{BracketKind, MatchId, Slot};

/// An entrant moving into the first placeholder slot of `destination`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotUpdate {
    pub destination: MatchId,
    pub name: String,
    pub seed: String,
}

/// The result of resolving a decided match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub updates: Vec<SlotUpdate>,
    /// Set when the grand final was decided.
    pub champion: Option<String>,
}

impl Resolution {
    /// Creates a new empty `Resolution`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the resolution changes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.champion.is_none()
    }

    fn winner(&mut self, source: MatchId, destination: Option<MatchId>, slot: &Slot) -> &mut Self {
        if let Some(destination) = destination {
            self.updates.push(SlotUpdate {
                destination,
                name: slot.name.trim().to_owned(),
                seed: format!("W{}", source),
            });
        }

        self
    }

    fn loser(&mut self, source: MatchId, destination: Option<MatchId>, slot: &Slot) -> &mut Self {
        if slot.is_placeholder() {
            return self;
        }

        if let Some(destination) = destination {
            self.updates.push(SlotUpdate {
                destination,
                name: slot.name.trim().to_owned(),
                seed: format!("L{}", source),
            });
        }

        self
    }
}

/// Resolves the decided match `id` won by `winner` against `loser`.
///
/// The caller is responsible for only passing decided matches. A `winner` that is still a
/// placeholder resolves to nothing, a `loser` that is still a placeholder does not drop to the
/// loser bracket.
pub fn resolve_match_result(id: MatchId, winner: &Slot, loser: &Slot) -> Resolution {
    let mut res = Resolution::new();

    if winner.is_placeholder() {
        log::debug!("Not advancing placeholder {:?} from {}", winner.name, id);
        return res;
    }

    match id.bracket() {
        BracketKind::Winner => {
            res.winner(id, winner_advance(id), winner)
                .loser(id, loser_drop(id), loser);
        }
        BracketKind::Loser => {
            res.winner(id, loser_advance(id), winner);
        }
        BracketKind::Final => match id {
            MatchId::GF => res.champion = Some(winner.name.trim().to_owned()),
            _ => {
                res.winner(id, winner_advance(id), winner);
            }
        },
    }

    log::debug!("Resolved {}: {:?}", id, res);

    res
}

/// Resolves a match given by its textual id. Ids outside the namespace resolve to nothing.
pub fn resolve_named(id: &str, winner: &Slot, loser: &Slot) -> Resolution {
    match id.parse() {
        Ok(id) => resolve_match_result(id, winner, loser),
        Err(err) => {
            log::debug!("Ignoring result for {:?}: {}", id, err);
            Resolution::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_match_result, resolve_named, Resolution, SlotUpdate};
    use crate::topology::{loser_advance, loser_drop, winner_advance};
    use crate::{BracketKind, MatchId, Slot};

    fn update(destination: MatchId, name: &str, seed: &str) -> SlotUpdate {
        SlotUpdate {
            destination,
            name: name.to_owned(),
            seed: seed.to_owned(),
        }
    }

    #[test]
    fn test_resolve_winner_bracket() {
        let winner = Slot::new("X", "1");
        let loser = Slot::new("Y", "16");

        for id in MatchId::ALL
            .into_iter()
            .filter(|id| id.bracket() == BracketKind::Winner)
        {
            let res = resolve_match_result(id, &winner, &loser);

            assert_eq!(
                res.updates,
                vec![
                    update(winner_advance(id).unwrap(), "X", &format!("W{}", id)),
                    update(loser_drop(id).unwrap(), "Y", &format!("L{}", id)),
                ]
            );
            assert_eq!(res.champion, None);
        }
    }

    #[test]
    fn test_resolve_winner_final() {
        let res = resolve_match_result(MatchId::F1, &Slot::new("X", "WC1"), &Slot::new("Y", "WC2"));

        assert_eq!(res.updates, vec![update(MatchId::GF, "X", "WF1")]);
        assert_eq!(res.champion, None);
    }

    #[test]
    fn test_resolve_loser_bracket() {
        let winner = Slot::new("X", "LA1");
        let loser = Slot::new("Y", "LA2");

        for id in MatchId::ALL
            .into_iter()
            .filter(|id| id.bracket() == BracketKind::Loser)
        {
            let res = resolve_match_result(id, &winner, &loser);

            assert_eq!(
                res.updates,
                vec![update(loser_advance(id).unwrap(), "X", &format!("W{}", id))]
            );
            assert!(res.updates.iter().all(|u| u.name != "Y"));
        }
    }

    #[test]
    fn test_resolve_grand_final() {
        let res = resolve_match_result(MatchId::GF, &Slot::new("X", "WF1"), &Slot::new("Q", "WL9"));

        assert!(res.updates.is_empty());
        assert_eq!(res.champion.as_deref(), Some("X"));
    }

    #[test]
    fn test_resolve_placeholders() {
        let res = resolve_match_result(
            MatchId::B1,
            &Slot::new("Winner A1", "W-A1"),
            &Slot::new("Z", "WA2"),
        );
        assert_eq!(res, Resolution::new());

        let res = resolve_match_result(MatchId::A1, &Slot::new("X", "1"), &Slot::new("", ""));
        assert_eq!(res.updates, vec![update(MatchId::B1, "X", "WA1")]);

        let res = resolve_match_result(MatchId::GF, &Slot::new("TBD", ""), &Slot::new("Q", ""));
        assert!(res.is_empty());
    }

    #[test]
    fn test_resolve_named() {
        let winner = Slot::new("X", "1");
        let loser = Slot::new("Y", "2");

        assert_eq!(
            resolve_named("A1", &winner, &loser),
            resolve_match_result(MatchId::A1, &winner, &loser)
        );
        assert!(resolve_named("Z9", &winner, &loser).is_empty());
        assert!(resolve_named("", &winner, &loser).is_empty());
    }
}

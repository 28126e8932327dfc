//! # Snapshots
//!
//! Serializable records of a [`Bracket`] and a [`League`]. Snapshots only contain the raw slot
//! and stat values; derived state is rebuilt by re-running the engine after restoring.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::standings::{FormResult, Stat};
use crate::{is_placeholder_name, Bracket, League, MatchId, MatchStore, Score, TeamRecord};

/// The storage key of bracket snapshots.
pub const BRACKET_KEY: &str = "tournamentBracket";

/// The storage key of league snapshots.
pub const LEAGUE_KEY: &str = "leagueStandings";

/// A snapshot of a [`Bracket`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub matches: Vec<MatchSnapshot>,
    pub champion: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: MatchId,
    pub teams: Vec<SlotSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    pub name: String,
    pub score: Score,
    pub seed: String,
    pub is_winner: bool,
}

impl Bracket {
    /// Takes a [`BracketSnapshot`] of the current state.
    #[inline]
    pub fn snapshot(&self) -> BracketSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Takes a [`BracketSnapshot`] of the current state with the given `timestamp`.
    pub fn snapshot_at(&self, timestamp: DateTime<Utc>) -> BracketSnapshot {
        let matches = self
            .matches()
            .iter()
            .map(|m| MatchSnapshot {
                match_id: m.id,
                teams: m
                    .slots
                    .iter()
                    .map(|slot| SlotSnapshot {
                        name: slot.name.clone(),
                        score: slot.score,
                        seed: slot.seed.clone(),
                        is_winner: slot.winner,
                    })
                    .collect(),
            })
            .collect();

        BracketSnapshot {
            matches,
            champion: self.champion().map(ToOwned::to_owned),
            timestamp,
        }
    }

    /// Restores the slots and champion from `snapshot` and re-evaluates all matches.
    ///
    /// Matches missing from the snapshot keep their current state. Teams beyond the second of
    /// a match are ignored. A missing or placeholder champion clears the champion.
    pub fn restore(&mut self, snapshot: &BracketSnapshot) {
        log::debug!(
            "Restoring Bracket from snapshot taken at {}",
            snapshot.timestamp
        );

        for saved in &snapshot.matches {
            let r#match = match MatchStore::get_mut(self, saved.match_id) {
                Some(r#match) => r#match,
                None => continue,
            };

            for (slot, team) in r#match.slots.iter_mut().zip(&saved.teams) {
                slot.name = team.name.clone();
                slot.score = team.score;
                slot.seed = team.seed.clone();
                slot.winner = team.is_winner;
            }
        }

        let champion = snapshot
            .champion
            .as_ref()
            .filter(|champion| !is_placeholder_name(champion))
            .cloned();
        MatchStore::set_champion(self, champion);

        self.evaluate_all();
    }

    /// Creates a new default [`Bracket`] and restores `snapshot` into it. The restored first
    /// round becomes the entrant list.
    pub fn from_snapshot(snapshot: &BracketSnapshot) -> Self {
        let mut this = Self::default();
        this.restore(snapshot);
        this.adopt_first_round();
        this
    }
}

/// A snapshot of a [`League`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub teams: Vec<TeamSnapshot>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub stats: StatsSnapshot,
    pub form: Vec<FormResult>,
    #[serde(default)]
    pub logo: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub pj: u32,
    pub pg: u32,
    pub pe: u32,
    pub pp: u32,
    pub gf: u32,
    pub gc: u32,
}

impl From<&TeamRecord> for TeamSnapshot {
    fn from(team: &TeamRecord) -> Self {
        Self {
            name: team.name.clone(),
            stats: StatsSnapshot {
                pj: team.stat(Stat::Played),
                pg: team.stat(Stat::Won),
                pe: team.stat(Stat::Drawn),
                pp: team.stat(Stat::Lost),
                gf: team.stat(Stat::GoalsFor),
                gc: team.stat(Stat::GoalsAgainst),
            },
            form: team.form.clone(),
            logo: team.logo.clone(),
        }
    }
}

impl TeamSnapshot {
    fn restore_into(&self, team: &mut TeamRecord) {
        team.name = self.name.clone();
        team.set_stat(Stat::Played, self.stats.pj);
        team.set_stat(Stat::Won, self.stats.pg);
        team.set_stat(Stat::Drawn, self.stats.pe);
        team.set_stat(Stat::Lost, self.stats.pp);
        team.set_stat(Stat::GoalsFor, self.stats.gf);
        team.set_stat(Stat::GoalsAgainst, self.stats.gc);
        team.form = self.form.clone();

        if !self.logo.is_empty() {
            team.logo = self.logo.clone();
        }
    }
}

impl League {
    /// Takes a [`LeagueSnapshot`] of the current state.
    #[inline]
    pub fn snapshot(&self) -> LeagueSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Takes a [`LeagueSnapshot`] of the current state with the given `timestamp`.
    pub fn snapshot_at(&self, timestamp: DateTime<Utc>) -> LeagueSnapshot {
        LeagueSnapshot {
            teams: self.teams().iter().map(TeamSnapshot::from).collect(),
            timestamp,
        }
    }

    /// Restores the teams from `snapshot`.
    ///
    /// Saved teams overwrite the existing teams by position. Saved teams beyond the existing
    /// ones are appended, existing teams beyond the saved ones are kept.
    pub fn restore(&mut self, snapshot: &LeagueSnapshot) {
        log::debug!(
            "Restoring League with {} teams from snapshot taken at {}",
            snapshot.teams.len(),
            snapshot.timestamp
        );

        for (index, saved) in snapshot.teams.iter().enumerate() {
            match self.team_mut(index) {
                Some(team) => saved.restore_into(team),
                None => {
                    let mut team = TeamRecord::new(saved.name.as_str());
                    saved.restore_into(&mut team);
                    self.push(team);
                }
            }
        }
    }

    /// Creates a new [`League`] from `snapshot`.
    pub fn from_snapshot(snapshot: &LeagueSnapshot) -> Self {
        let mut this = Self::default();
        this.restore(snapshot);
        this
    }
}

//! # League standings
//!
//! A [`League`] holds the raw stats of every team. Points and goal difference are derived,
//! [`League::ranking`] orders the teams and [`League::standings`] renders the table.
use std::borrow::Cow;
use std::cmp::{Ordering, Reverse};
use std::fmt::{self, Display, Formatter};
use std::iter::FusedIterator;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::StrExt;
use crate::{Error, Result, MAX_NAME_LENGTH};

/// The number of recent results shown for every team.
pub const FORM_LENGTH: usize = 5;

/// The default name of a team appended with [`League::add_team`].
pub const NEW_TEAM_NAME: &str = "New Team";

/// The result of a recent match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormResult {
    #[cfg_attr(feature = "serde", serde(rename = "G"))]
    Win,
    #[cfg_attr(feature = "serde", serde(rename = "E"))]
    Draw,
    #[cfg_attr(feature = "serde", serde(rename = "P"))]
    Loss,
}

impl FormResult {
    /// Returns the next result in the cycle `Win -> Draw -> Loss -> Win`.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Win => Self::Draw,
            Self::Draw => Self::Loss,
            Self::Loss => Self::Win,
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "G",
            Self::Draw => "E",
            Self::Loss => "P",
        }
    }
}

impl Display for FormResult {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormResult {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "G" => Ok(Self::Win),
            "E" => Ok(Self::Draw),
            "P" => Ok(Self::Loss),
            s => Err(Error::InvalidFormResult(s.to_owned())),
        }
    }
}

/// An editable stat of a [`TeamRecord`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stat {
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
}

impl FromStr for Stat {
    type Err = Error;

    /// Parses the column name of a stat (`pj`, `pg`, `pe`, `pp`, `gf` or `gc`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pj" => Ok(Self::Played),
            "pg" => Ok(Self::Won),
            "pe" => Ok(Self::Drawn),
            "pp" => Ok(Self::Lost),
            "gf" => Ok(Self::GoalsFor),
            "gc" => Ok(Self::GoalsAgainst),
            _ => Err(Error::UnknownStat(s.to_owned())),
        }
    }
}

/// A column the table can be temporarily sorted by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Points,
    GoalDifference,
    GoalsFor,
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pts" => Ok(Self::Points),
            "dg" => Ok(Self::GoalDifference),
            "gf" => Ok(Self::GoalsFor),
            _ => Err(Error::UnknownColumn(s.to_owned())),
        }
    }
}

/// The qualification zone of a ranked team.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Positions 1 and 2.
    Promotion,
    /// Positions 3 and 4.
    Playoff,
}

impl Zone {
    /// Returns the zone of the 1-based `position`.
    pub const fn of(position: usize) -> Option<Self> {
        match position {
            1 | 2 => Some(Self::Promotion),
            3 | 4 => Some(Self::Playoff),
            _ => None,
        }
    }
}

/// The stats of a team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    pub name: String,
    pub logo: String,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    pub form: Vec<FormResult>,
}

impl TeamRecord {
    /// Creates a new `TeamRecord` with all stats zero and a form of losses.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim_truncate(MAX_NAME_LENGTH),
            logo: String::new(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            form: vec![FormResult::Loss; FORM_LENGTH],
        }
    }

    #[inline]
    pub fn stat(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Played => self.played,
            Stat::Won => self.won,
            Stat::Drawn => self.drawn,
            Stat::Lost => self.lost,
            Stat::GoalsFor => self.goals_for,
            Stat::GoalsAgainst => self.goals_against,
        }
    }

    #[inline]
    pub fn set_stat(&mut self, stat: Stat, value: u32) {
        let field = match stat {
            Stat::Played => &mut self.played,
            Stat::Won => &mut self.won,
            Stat::Drawn => &mut self.drawn,
            Stat::Lost => &mut self.lost,
            Stat::GoalsFor => &mut self.goals_for,
            Stat::GoalsAgainst => &mut self.goals_against,
        };

        *field = value;
    }

    /// Returns three points per win plus one per draw.
    #[inline]
    pub fn points(&self) -> u64 {
        u64::from(self.won) * 3 + u64::from(self.drawn)
    }

    #[inline]
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Zeroes all stats and resets the form to losses.
    pub fn reset(&mut self) {
        let logo = std::mem::take(&mut self.logo);
        let name = std::mem::take(&mut self.name);

        *self = Self {
            name,
            logo,
            ..Self::new("")
        };
    }

    fn column(&self, column: Column) -> i64 {
        match column {
            Column::Points => i64::from(self.won) * 3 + i64::from(self.drawn),
            Column::GoalDifference => self.goal_difference(),
            Column::GoalsFor => i64::from(self.goals_for),
        }
    }
}

/// A team at its position in the ranking.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ranked {
    /// The index of the team in [`League::teams`].
    pub index: usize,
    /// The 1-based position.
    pub position: usize,
    pub zone: Option<Zone>,
}

/// The teams of a league in their original order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct League {
    teams: Vec<TeamRecord>,
}

impl League {
    /// Creates a new `League` with a fresh [`TeamRecord`] for every name.
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let teams: Vec<TeamRecord> = names
            .into_iter()
            .map(|name| TeamRecord::new(name.as_ref()))
            .collect();

        log::debug!("Creating a new League with {} teams", teams.len());

        Self { teams }
    }

    #[inline]
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    #[inline]
    pub fn team_mut(&mut self, index: usize) -> Option<&mut TeamRecord> {
        self.teams.get_mut(index)
    }

    #[inline]
    pub fn push(&mut self, team: TeamRecord) {
        self.teams.push(team);
    }

    fn team_or_err(&mut self, index: usize) -> Result<&mut TeamRecord> {
        self.teams.get_mut(index).ok_or(Error::UnknownTeam(index))
    }

    /// Appends a new team, returning its index. An empty `name` uses [`NEW_TEAM_NAME`].
    pub fn add_team(&mut self, name: Option<&str>) -> usize {
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => NEW_TEAM_NAME,
        };

        log::debug!("Adding team {:?}", name);

        self.teams.push(TeamRecord::new(name));
        self.teams.len() - 1
    }

    pub fn set_name(&mut self, index: usize, name: &str) -> Result<()> {
        self.team_or_err(index)?.name = name.trim_truncate(MAX_NAME_LENGTH);
        Ok(())
    }

    pub fn set_stat(&mut self, index: usize, stat: Stat, value: u32) -> Result<()> {
        log::debug!("Setting {:?} of team {} to {}", stat, index, value);

        self.team_or_err(index)?.set_stat(stat, value);
        Ok(())
    }

    /// Advances the form result at `position` to the next result in the cycle.
    ///
    /// `position` must be below [`FORM_LENGTH`] or the number of stored results, whichever is
    /// larger.
    pub fn cycle_form(&mut self, index: usize, position: usize) -> Result<FormResult> {
        let team = self.team_or_err(index)?;

        if position >= FORM_LENGTH.max(team.form.len()) {
            return Err(Error::InvalidFormPosition(position));
        }

        // Teams restored from short snapshots may have fewer results.
        if team.form.len() <= position {
            team.form.resize(position + 1, FormResult::Loss);
        }

        let result = team.form[position].next();
        team.form[position] = result;

        Ok(result)
    }

    /// Zeroes the stats of all teams.
    pub fn reset(&mut self) {
        log::debug!("Resetting League");

        for team in &mut self.teams {
            team.reset();
        }
    }

    /// Ranks the teams by points, goal difference and goals for, all descending. Ties keep the
    /// original order.
    pub fn ranking(&self) -> Vec<Ranked> {
        let mut order: Vec<usize> = (0..self.teams.len()).collect();

        order.sort_by_key(|&index| {
            let team = &self.teams[index];
            (
                Reverse(team.points()),
                Reverse(team.goal_difference()),
                Reverse(team.goals_for),
                index,
            )
        });

        order
            .into_iter()
            .enumerate()
            .map(|(position, index)| Ranked {
                index,
                position: position + 1,
                zone: Zone::of(position + 1),
            })
            .collect()
    }

    /// Returns the team indices ordered by `column` descending, ties broken by points.
    pub fn sorted_by(&self, column: Column) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.teams.len()).collect();

        order.sort_by(|&a, &b| {
            let (a, b) = (&self.teams[a], &self.teams[b]);

            match b.column(column).cmp(&a.column(column)) {
                Ordering::Equal => b.points().cmp(&a.points()),
                ordering => ordering,
            }
        });

        order
    }

    /// Renders the table in ranking order.
    pub fn standings(&self) -> Standings {
        self.render(self.ranking())
    }

    /// Renders the table sorted by `column`. Positions still refer to the ranking.
    pub fn standings_by(&self, column: Column) -> Standings {
        let ranking = self.ranking();

        let rows = self
            .sorted_by(column)
            .into_iter()
            .filter_map(|index| ranking.iter().find(|r| r.index == index).copied())
            .collect();

        self.render(rows)
    }

    fn render(&self, rows: Vec<Ranked>) -> Standings {
        let mut builder = Standings::builder();
        for key in ["Pos", "Team", "PJ", "PG", "PE", "PP", "GF", "GC", "DG", "Pts", "Form"] {
            builder.key(key);
        }

        for row in rows {
            let team = &self.teams[row.index];

            builder.entry(row.index, row.zone, |entry| {
                let form: String = team.form.iter().map(|r| r.as_str()).collect();

                entry
                    .value(row.position as u64)
                    .value(team.name.clone())
                    .value(u64::from(team.played))
                    .value(u64::from(team.won))
                    .value(u64::from(team.drawn))
                    .value(u64::from(team.lost))
                    .value(u64::from(team.goals_for))
                    .value(u64::from(team.goals_against))
                    .value(format_goal_difference(team.goal_difference()))
                    .value(team.points())
                    .value(form);
            });
        }

        builder.build()
    }
}

/// Formats a goal difference with an explicit sign for non-negative values.
pub fn format_goal_difference(value: i64) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

#[derive(Clone, Debug)]
pub struct Standings {
    entries: Vec<Entry>,
    keys: Vec<Cow<'static, str>>,
}

impl Standings {
    #[inline]
    pub fn builder() -> Builder {
        Builder::new()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self,
            next: 0,
        }
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self,
            next: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Builder {
    keys: Vec<Cow<'static, str>>,
    entries: Vec<Entry>,
}

impl Builder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn key<K>(&mut self, key: K) -> &mut Self
    where
        K: Into<Cow<'static, str>>,
    {
        self.keys.push(key.into());
        self
    }

    pub fn entry<F>(&mut self, index: usize, zone: Option<Zone>, f: F) -> &mut Self
    where
        F: FnOnce(&mut EntryBuilder),
    {
        let mut builder = EntryBuilder::new(index, zone);
        f(&mut builder);
        self.entries.push(builder.build());
        self
    }

    #[inline]
    pub fn build(self) -> Standings {
        Standings {
            entries: self.entries,
            keys: self.keys,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntryBuilder {
    index: usize,
    zone: Option<Zone>,
    values: Vec<EntryValue>,
}

impl EntryBuilder {
    #[inline]
    const fn new(index: usize, zone: Option<Zone>) -> Self {
        Self {
            index,
            zone,
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn value<V>(&mut self, value: V) -> &mut Self
    where
        V: Into<EntryValue>,
    {
        self.values.push(value.into());
        self
    }

    #[inline]
    fn build(self) -> Entry {
        Entry {
            index: self.index,
            zone: self.zone,
            values: self.values,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: &'a Standings,
    next: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.entries.get(self.next)?;
        self.next += 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.entries.len() - self.next
    }
}

impl<'a> FusedIterator for Iter<'a> {}

#[derive(Clone, Debug)]
pub struct Keys<'a> {
    inner: &'a Standings,
    next: usize,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.inner.keys.get(self.next)?;
        self.next += 1;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a> ExactSizeIterator for Keys<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.keys.len() - self.next
    }
}

/// A row of the [`Standings`] table.
#[derive(Clone, Debug)]
pub struct Entry {
    /// The index of the team in [`League::teams`].
    pub index: usize,
    pub zone: Option<Zone>,
    pub values: Vec<EntryValue>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryValue {
    U64(u64),
    Str(Cow<'static, str>),
}

impl Display for EntryValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(val) => Display::fmt(val, f),
            Self::Str(val) => Display::fmt(val, f),
        }
    }
}

impl From<u64> for EntryValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<String> for EntryValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league() -> League {
        let mut league = League::new(["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);

        // Alpha: 4 pts, +1
        league.set_stat(0, Stat::Won, 1).unwrap();
        league.set_stat(0, Stat::Drawn, 1).unwrap();
        league.set_stat(0, Stat::GoalsFor, 3).unwrap();
        league.set_stat(0, Stat::GoalsAgainst, 2).unwrap();

        // Beta: 6 pts, +0
        league.set_stat(1, Stat::Won, 2).unwrap();
        league.set_stat(1, Stat::GoalsFor, 4).unwrap();
        league.set_stat(1, Stat::GoalsAgainst, 4).unwrap();

        // Gamma: 4 pts, +1, more goals than Alpha
        league.set_stat(2, Stat::Won, 1).unwrap();
        league.set_stat(2, Stat::Drawn, 1).unwrap();
        league.set_stat(2, Stat::GoalsFor, 5).unwrap();
        league.set_stat(2, Stat::GoalsAgainst, 4).unwrap();

        // Delta: 4 pts, +3
        league.set_stat(3, Stat::Won, 1).unwrap();
        league.set_stat(3, Stat::Drawn, 1).unwrap();
        league.set_stat(3, Stat::GoalsFor, 3).unwrap();

        league
    }

    #[test]
    fn test_team_record() {
        let mut team = TeamRecord::new("  Alpha ");
        assert_eq!(team.name, "Alpha");
        assert_eq!(team.form, vec![FormResult::Loss; FORM_LENGTH]);

        team.set_stat(Stat::Won, 3);
        team.set_stat(Stat::Drawn, 2);
        team.set_stat(Stat::GoalsFor, 1);
        team.set_stat(Stat::GoalsAgainst, 4);
        assert_eq!(team.points(), 11);
        assert_eq!(team.goal_difference(), -3);

        team.logo = String::from("*");
        team.reset();
        assert_eq!(team.points(), 0);
        assert_eq!(team.stat(Stat::GoalsAgainst), 0);
        assert_eq!(team.name, "Alpha");
        assert_eq!(team.logo, "*");
    }

    #[test]
    fn test_ranking() {
        let ranking = league().ranking();

        let order: Vec<usize> = ranking.iter().map(|r| r.index).collect();
        assert_eq!(order, [1, 3, 2, 0, 4]);

        let positions: Vec<usize> = ranking.iter().map(|r| r.position).collect();
        assert_eq!(positions, [1, 2, 3, 4, 5]);

        let zones: Vec<Option<Zone>> = ranking.iter().map(|r| r.zone).collect();
        assert_eq!(
            zones,
            [
                Some(Zone::Promotion),
                Some(Zone::Promotion),
                Some(Zone::Playoff),
                Some(Zone::Playoff),
                None
            ]
        );
    }

    #[test]
    fn test_ranking_large_stats() {
        let mut league = League::new(["A", "B"]);
        league.set_stat(0, Stat::Won, u32::MAX).unwrap();
        league.set_stat(0, Stat::Drawn, u32::MAX).unwrap();
        league.set_stat(1, Stat::Won, 1).unwrap();

        assert_eq!(league.teams()[0].points(), u64::from(u32::MAX) * 4);

        let order: Vec<usize> = league.ranking().iter().map(|r| r.index).collect();
        assert_eq!(order, [0, 1]);
        assert_eq!(league.sorted_by(Column::Points), [0, 1]);

        let standings = league.standings();
        let first = standings.iter().next().unwrap();
        assert_eq!(first.values[9], EntryValue::U64(u64::from(u32::MAX) * 4));
    }

    #[test]
    fn test_ranking_keeps_original_order() {
        let league = League::new(["A", "B", "C"]);
        let order: Vec<usize> = league.ranking().iter().map(|r| r.index).collect();
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn test_sorted_by() {
        let league = league();

        assert_eq!(league.sorted_by(Column::Points), [1, 0, 2, 3, 4]);
        assert_eq!(league.sorted_by(Column::GoalDifference), [3, 0, 2, 1, 4]);
        assert_eq!(league.sorted_by(Column::GoalsFor), [2, 1, 0, 3, 4]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("pts".parse::<Column>(), Ok(Column::Points));
        assert_eq!("DG".parse::<Column>(), Ok(Column::GoalDifference));
        assert_eq!(
            "pos".parse::<Column>(),
            Err(Error::UnknownColumn(String::from("pos")))
        );

        assert_eq!("gc".parse::<Stat>(), Ok(Stat::GoalsAgainst));
        assert!("pts".parse::<Stat>().is_err());

        assert_eq!("E".parse::<FormResult>(), Ok(FormResult::Draw));
        assert!("X".parse::<FormResult>().is_err());
    }

    #[test]
    fn test_cycle_form() {
        let mut league = League::new(["A"]);

        assert_eq!(league.cycle_form(0, 2), Ok(FormResult::Win));
        assert_eq!(league.cycle_form(0, 2), Ok(FormResult::Draw));
        assert_eq!(league.cycle_form(0, 2), Ok(FormResult::Loss));
        assert_eq!(league.cycle_form(0, 4), Ok(FormResult::Win));
        assert_eq!(league.cycle_form(0, 5), Err(Error::InvalidFormPosition(5)));
        assert_eq!(
            league.cycle_form(0, usize::MAX),
            Err(Error::InvalidFormPosition(usize::MAX))
        );
        assert_eq!(league.teams()[0].form.len(), FORM_LENGTH);

        // Short forms grow up to the default length.
        league.team_mut(0).unwrap().form.truncate(2);
        assert_eq!(league.cycle_form(0, 3), Ok(FormResult::Win));
        assert_eq!(league.teams()[0].form.len(), 4);

        assert_eq!(league.cycle_form(1, 0), Err(Error::UnknownTeam(1)));
    }

    #[test]
    fn test_add_team_and_reset() {
        let mut league = league();

        assert_eq!(league.add_team(None), 5);
        assert_eq!(league.add_team(Some("  ")), 6);
        assert_eq!(league.add_team(Some("Zeta")), 7);
        assert_eq!(league.teams()[5].name, NEW_TEAM_NAME);
        assert_eq!(league.teams()[7].name, "Zeta");

        league.reset();
        assert!(league.teams().iter().all(|team| team.points() == 0));
        assert_eq!(league.teams()[1].name, "Beta");
        assert_eq!(league.set_stat(8, Stat::Won, 1), Err(Error::UnknownTeam(8)));
    }

    #[test]
    fn test_standings() {
        let standings = league().standings();

        assert_eq!(
            standings.keys().collect::<Vec<_>>(),
            ["Pos", "Team", "PJ", "PG", "PE", "PP", "GF", "GC", "DG", "Pts", "Form"]
        );
        assert_eq!(standings.iter().len(), 5);

        let first = standings.iter().next().unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.zone, Some(Zone::Promotion));
        assert_eq!(first.values[0], EntryValue::U64(1));
        assert_eq!(first.values[1].to_string(), "Beta");
        assert_eq!(first.values[8].to_string(), "+0");
        assert_eq!(first.values[9], EntryValue::U64(6));
        assert_eq!(first.values[10].to_string(), "PPPPP");
    }

    #[test]
    fn test_standings_by() {
        let standings = league().standings_by(Column::GoalsFor);

        let rows: Vec<(usize, String)> = standings
            .iter()
            .map(|entry| (entry.index, entry.values[0].to_string()))
            .collect();

        assert_eq!(
            rows,
            [
                (2, String::from("3")),
                (1, String::from("1")),
                (0, String::from("4")),
                (3, String::from("2")),
                (4, String::from("5")),
            ]
        );
    }

    #[test]
    fn test_format_goal_difference() {
        assert_eq!(format_goal_difference(0), "+0");
        assert_eq!(format_goal_difference(3), "+3");
        assert_eq!(format_goal_difference(-2), "-2");
    }
}

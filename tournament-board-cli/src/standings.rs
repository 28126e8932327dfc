use clap::Subcommand;
use tournament_board_core::snapshot::{LeagueSnapshot, LEAGUE_KEY};
use tournament_board_core::standings::{Column, Stat, Standings, Zone};
use tournament_board_core::League;

use crate::storage::LocalStorage;
use crate::utils::{confirm, render_table, Position};
use crate::Result;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the table.
    Show {
        /// Sort by "pts", "dg" or "gf" instead of the ranking.
        #[clap(short, long)]
        sort: Option<Column>,
    },
    /// Start a new league with the given teams.
    New { names: Vec<String> },
    /// Append a team with zero stats.
    Add { name: Option<String> },
    /// Set a stat ("pj", "pg", "pe", "pp", "gf" or "gc") of a team.
    Set {
        team: Position,
        stat: Stat,
        value: u32,
    },
    /// Cycle a recent result of a team.
    Form { team: Position, result: Position },
    /// Rename a team.
    Name { team: Position, name: String },
    /// Zero the stats of all teams.
    Reset {
        #[clap(short, long)]
        yes: bool,
    },
}

impl Command {
    pub fn run(&self, storage: &LocalStorage) -> Result<()> {
        let mut league = load(storage);

        match self {
            Self::Show { sort } => {
                let standings = match sort {
                    Some(column) => league.standings_by(*column),
                    None => league.standings(),
                };

                print!("{}", render(&standings));
                return Ok(());
            }
            Self::New { names } => {
                league = League::new(names);
            }
            Self::Add { name } => {
                let index = league.add_team(name.as_deref());
                println!("Added team {}", index + 1);
            }
            Self::Set { team, stat, value } => {
                league.set_stat(team.index(), *stat, *value)?;
            }
            Self::Form { team, result } => {
                let form = league.cycle_form(team.index(), result.index())?;
                println!("Result {} is now {}", result.index() + 1, form);
            }
            Self::Name { team, name } => {
                league.set_name(team.index(), name)?;
            }
            Self::Reset { yes } => {
                if !*yes && !confirm("Zero the stats of all teams?")? {
                    return Ok(());
                }

                league.reset();
            }
        }

        storage.set(LEAGUE_KEY, &league.snapshot())?;
        print!("{}", render(&league.standings()));

        Ok(())
    }
}

/// Loads the stored league, falling back to an empty league.
fn load(storage: &LocalStorage) -> League {
    storage
        .load::<LeagueSnapshot>(LEAGUE_KEY)
        .map(|snapshot| League::from_snapshot(&snapshot))
        .unwrap_or_default()
}

fn render(standings: &Standings) -> String {
    let keys = standings.keys().chain(["Zone"]);

    let rows = standings.iter().map(|entry| {
        let zone = match entry.zone {
            Some(Zone::Promotion) => "promotion",
            Some(Zone::Playoff) => "playoff",
            None => "",
        };

        let mut row: Vec<String> = entry.values.iter().map(ToString::to_string).collect();
        row.push(zone.to_owned());
        row
    });

    render_table(keys, rows)
}

#[cfg(test)]
mod tests {
    use tournament_board_core::standings::Stat;
    use tournament_board_core::League;

    use super::render;

    #[test]
    fn test_render() {
        let mut league = League::new(["Alpha", "Beta"]);
        league.set_stat(1, Stat::Won, 1).unwrap();

        let out = render(&league.standings());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Pos | Team"));
        assert!(lines[0].ends_with("| Zone"));
        assert!(lines[1].starts_with("1   | Beta"));
        assert!(lines[1].ends_with("| promotion"));
        assert!(lines[2].starts_with("2   | Alpha"));
        assert!(lines[2].contains("| +0 |"));
    }
}

use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_board_core::snapshot::{BracketSnapshot, BRACKET_KEY};
use tournament_board_core::{Bracket, Evaluation, MatchId, Score, Slot, TBD};

use crate::storage::LocalStorage;
use crate::utils::{confirm, render_table, Position};
use crate::Result;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print all matches and the champion.
    Show,
    /// Start a new bracket with up to 16 entrants.
    New { names: Vec<String> },
    /// Set the score of a slot. Use "-" to clear it.
    Score {
        id: MatchId,
        slot: Position,
        #[clap(allow_hyphen_values = true)]
        score: Score,
    },
    /// Rename the entrant in a slot.
    Name {
        id: MatchId,
        slot: Position,
        name: String,
    },
    /// Toggle the winner of a match. The highlight is recomputed from the scores the next time
    /// the bracket is loaded. A winner that already advanced stays advanced.
    Winner { id: MatchId, slot: Position },
    /// Override the champion.
    Champion { name: String },
    /// Play all ready matches with random scores.
    Auto {
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Clear all results.
    Reset {
        #[clap(short, long)]
        yes: bool,
    },
}

impl Command {
    pub fn run(&self, storage: &LocalStorage) -> Result<()> {
        let mut bracket = load(storage);

        match self {
            Self::Show => {
                print!("{}", render(&bracket));
                return Ok(());
            }
            Self::New { names } => {
                bracket = Bracket::new(names);
            }
            Self::Score { id, slot, score } => {
                let eval = bracket.set_score(*id, slot.index(), *score)?;
                report(&eval);
            }
            Self::Name { id, slot, name } => {
                bracket.set_name(*id, slot.index(), name)?;
            }
            Self::Winner { id, slot } => {
                let eval = bracket.select_winner(*id, slot.index())?;
                report(&eval);
            }
            Self::Champion { name } => {
                bracket.set_champion(name);
            }
            Self::Auto { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };

                let played = bracket.auto_advance(&mut rng);
                println!("Played {} matches", played);
            }
            Self::Reset { yes } => {
                if !*yes && !confirm("Clear all results of the bracket?")? {
                    return Ok(());
                }

                bracket.reset();
            }
        }

        storage.set(BRACKET_KEY, &bracket.snapshot())?;
        print!("{}", render(&bracket));

        Ok(())
    }
}

/// Loads the stored bracket, falling back to the default bracket.
fn load(storage: &LocalStorage) -> Bracket {
    storage
        .load::<BracketSnapshot>(BRACKET_KEY)
        .map(|snapshot| Bracket::from_snapshot(&snapshot))
        .unwrap_or_default()
}

fn report(eval: &Evaluation) {
    for write in &eval.writes {
        println!(
            "{} -> {} slot {} ({})",
            write.name,
            write.destination,
            write.slot + 1,
            write.seed
        );
    }

    if let Some(champion) = &eval.champion {
        println!("Champion: {}", champion);
    }
}

fn slot_cells(slot: &Slot) -> [String; 3] {
    let name = if slot.winner {
        format!("*{}", slot.name)
    } else {
        slot.name.clone()
    };

    [name, slot.seed.clone(), slot.score.to_string()]
}

fn render(bracket: &Bracket) -> String {
    let rows = bracket.matches().iter().map(|m| {
        let mut row = vec![m.id.to_string(), m.id.round().to_string()];
        row.extend(slot_cells(&m[0]));
        row.extend(slot_cells(&m[1]));
        row
    });

    let mut out = render_table(
        ["Match", "Round", "Team 1", "Seed", "Score", "Team 2", "Seed", "Score"],
        rows,
    );
    out.push_str(&format!(
        "Champion: {}\n",
        bracket.champion().unwrap_or(TBD)
    ));

    out
}

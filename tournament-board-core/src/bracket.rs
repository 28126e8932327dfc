//! # Bracket state
//!
//! The [`MatchStore`] trait abstracts the storage of all match slots and the champion. The
//! engine functions [`apply_update`] and [`evaluate`] work on any store; [`Bracket`] is the
//! in-memory store used by the board.
use rand::Rng;

use crate::topology::feeders;
use crate::utils::StrExt;
use crate::{
    is_placeholder_name, resolve_match_result, Error, Match, MatchId, Outcome, Resolution,
    Result, Round, Score, Slot, SlotUpdate, MAX_CHAMPION_LENGTH, MAX_NAME_LENGTH, TBD,
};

/// The number of entrants in the first round.
pub const ENTRANTS: usize = 16;

/// Storage for the slots of every match and the champion.
pub trait MatchStore {
    /// Returns a reference to the match `id`. Returns `None` if the store does not hold it.
    fn get(&self, id: MatchId) -> Option<&Match>;

    /// Returns a mutable reference to the match `id`.
    fn get_mut(&mut self, id: MatchId) -> Option<&mut Match>;

    /// Returns the current champion.
    fn champion(&self) -> Option<&str>;

    /// Sets or clears the champion.
    fn set_champion(&mut self, champion: Option<String>);
}

/// A write performed on a destination slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotWrite {
    pub destination: MatchId,
    /// The index of the written slot.
    pub slot: usize,
    pub name: String,
    pub seed: String,
}

/// The report of evaluating a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub id: MatchId,
    pub outcome: Outcome,
    /// All writes applied to downstream matches.
    pub writes: Vec<SlotWrite>,
    /// Set if the champion was decided by this evaluation.
    pub champion: Option<String>,
}

impl Evaluation {
    #[inline]
    fn new(id: MatchId, outcome: Outcome) -> Self {
        Self {
            id,
            outcome,
            writes: Vec::new(),
            champion: None,
        }
    }
}

/// Writes `update` into the first placeholder slot of its destination match.
///
/// Returns the index of the written slot. The update is dropped and `None` is returned if both
/// slots of the destination already hold real entrants or if a slot already carries the seed
/// label of the update, which makes re-applying the same update a no-op.
pub fn apply_update<S>(store: &mut S, update: &SlotUpdate) -> Option<usize>
where
    S: MatchStore + ?Sized,
{
    let r#match = store.get_mut(update.destination)?;

    // A seed label names exactly one edge, so a source delivers at most one entrant per role.
    if r#match.slots.iter().any(|slot| slot.seed == update.seed) {
        log::trace!(
            "{} already holds an entrant from {}",
            update.destination,
            update.seed
        );
        return None;
    }

    let index = match r#match.first_placeholder() {
        Some(index) => index,
        None => {
            log::debug!(
                "Dropping {:?} ({}): {} has no free slot",
                update.name,
                update.seed,
                update.destination
            );
            return None;
        }
    };

    r#match[index].assign(&update.name, &update.seed);

    log::debug!(
        "Moved {:?} ({}) into {} slot {}",
        update.name,
        update.seed,
        update.destination,
        index
    );

    Some(index)
}

/// Applies all updates of `res` to `store` and records the champion.
fn apply_resolution<S>(store: &mut S, res: Resolution, eval: &mut Evaluation)
where
    S: MatchStore + ?Sized,
{
    for update in res.updates {
        if let Some(slot) = apply_update(store, &update) {
            eval.writes.push(SlotWrite {
                destination: update.destination,
                slot,
                name: update.name,
                seed: update.seed,
            });
        }
    }

    if let Some(champion) = res.champion {
        log::info!("{} is the champion", champion);

        store.set_champion(Some(champion.clone()));
        eval.champion = Some(champion);
    }
}

/// Re-evaluates the match `id` from its scores.
///
/// The winner flags of both slots are recomputed. If the match is decided its result is
/// resolved and applied to the downstream matches. Evaluating the same match repeatedly
/// performs no further writes. Unknown matches evaluate to [`Outcome::Undecided`].
pub fn evaluate<S>(store: &mut S, id: MatchId) -> Evaluation
where
    S: MatchStore + ?Sized,
{
    let r#match = match store.get_mut(id) {
        Some(r#match) => r#match,
        None => return Evaluation::new(id, Outcome::Undecided),
    };

    let outcome = r#match.outcome();
    for (index, slot) in r#match.slots.iter_mut().enumerate() {
        slot.winner = outcome.winner() == Some(index);
    }

    let mut eval = Evaluation::new(id, outcome);

    if let Outcome::Decided { winner } = outcome {
        let res = resolve_match_result(id, &r#match[winner], &r#match[1 - winner]);
        apply_resolution(store, res, &mut eval);
    }

    eval
}

/// The in-memory bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    entrants: Vec<String>,
    matches: Vec<Match>,
    champion: Option<String>,
}

impl Bracket {
    /// Creates a new `Bracket` with the given first round `entrants`.
    ///
    /// Entrants are placed in order (`A1` slot 0, `A1` slot 1, `A2` slot 0, ...) and seeded
    /// `1` to `16`. Missing entrants are [`TBD`], surplus entrants are ignored.
    pub fn new<I, T>(entrants: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut entrants: Vec<String> = entrants
            .into_iter()
            .take(ENTRANTS)
            .map(|entrant| Into::<String>::into(entrant).trim_truncate(MAX_NAME_LENGTH))
            .collect();

        entrants.resize(ENTRANTS, TBD.to_owned());

        log::debug!("Creating a new Bracket with {} entrants", entrants.len());

        let matches = Self::initial_matches(&entrants);

        Self {
            entrants,
            matches,
            champion: None,
        }
    }

    fn initial_matches(entrants: &[String]) -> Vec<Match> {
        MatchId::ALL
            .into_iter()
            .map(|id| {
                let feeds = feeders(id);

                let slots = [0, 1].map(|index| match feeds.get(index) {
                    Some(feed) => Slot::new(feed.placeholder_name(), feed.placeholder_seed()),
                    // Only first round matches have no feeding edges.
                    None => {
                        let seed = id.index() * 2 + index;
                        Slot::new(entrants[seed].clone(), (seed + 1).to_string())
                    }
                });

                Match::new(id, slots)
            })
            .collect()
    }

    /// Returns the first round entrants.
    #[inline]
    pub fn entrants(&self) -> &[String] {
        &self.entrants
    }

    /// Returns all matches in topological order.
    #[inline]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Returns a reference to the match `id`.
    #[inline]
    pub fn get(&self, id: MatchId) -> &Match {
        &self.matches[id.index()]
    }

    /// Returns the current champion.
    #[inline]
    pub fn champion(&self) -> Option<&str> {
        self.champion.as_deref()
    }

    fn slot_mut(&mut self, id: MatchId, slot: usize) -> Result<&mut Slot> {
        self.matches[id.index()]
            .get_mut(slot)
            .ok_or(Error::InvalidSlot(slot))
    }

    /// Sets the score of a slot and re-evaluates the match.
    pub fn set_score(&mut self, id: MatchId, slot: usize, score: Score) -> Result<Evaluation> {
        log::debug!("Setting score of {} slot {} to {}", id, slot, score);

        self.slot_mut(id, slot)?.score = score;
        Ok(self.evaluate(id))
    }

    /// Renames the entrant in a slot. Names are trimmed and truncated to
    /// [`MAX_NAME_LENGTH`] characters.
    pub fn set_name(&mut self, id: MatchId, slot: usize, name: &str) -> Result<()> {
        let name = name.trim_truncate(MAX_NAME_LENGTH);
        log::debug!("Renaming {} slot {} to {:?}", id, slot, name);

        self.slot_mut(id, slot)?.name = name;
        Ok(())
    }

    /// Overrides the champion. Names are truncated to [`MAX_CHAMPION_LENGTH`] characters, a
    /// placeholder name clears the champion.
    pub fn set_champion(&mut self, name: &str) {
        let name = name.trim_truncate(MAX_CHAMPION_LENGTH);

        self.champion = if is_placeholder_name(&name) {
            None
        } else {
            Some(name)
        };
    }

    /// Re-evaluates the match `id`. See [`evaluate`].
    #[inline]
    pub fn evaluate(&mut self, id: MatchId) -> Evaluation {
        evaluate(self, id)
    }

    /// Re-evaluates all matches in topological order.
    pub fn evaluate_all(&mut self) -> Vec<Evaluation> {
        MatchId::ALL
            .into_iter()
            .map(|id| self.evaluate(id))
            .collect()
    }

    /// Toggles the winner flag of a slot.
    ///
    /// If the slot was not the winner it becomes the only winner of the match and advances as
    /// if it had won by score. Selecting the current winner clears the flag without any
    /// advancement.
    pub fn select_winner(&mut self, id: MatchId, slot: usize) -> Result<Evaluation> {
        if slot > 1 {
            return Err(Error::InvalidSlot(slot));
        }

        let r#match = &mut self.matches[id.index()];
        let was_winner = r#match[slot].winner;

        for s in r#match.slots.iter_mut() {
            s.winner = false;
        }

        if was_winner {
            log::debug!("Cleared winner of {}", id);
            return Ok(Evaluation::new(id, Outcome::Undecided));
        }

        r#match[slot].winner = true;
        log::debug!("Selected slot {} as winner of {}", slot, id);

        let outcome = Outcome::Decided { winner: slot };
        let res = resolve_match_result(id, &r#match[slot], &r#match[1 - slot]);

        let mut eval = Evaluation::new(id, outcome);
        apply_resolution(self, res, &mut eval);

        Ok(eval)
    }

    /// Plays every match with two real entrants using random scores from `0..3`.
    ///
    /// Matches are visited once in topological order, so entrants advanced during the pass are
    /// played in later rounds of the same pass. Returns the number of matches played.
    pub fn auto_advance<R>(&mut self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let mut played = 0;

        for id in MatchId::ALL {
            let r#match = &mut self.matches[id.index()];
            if !r#match.is_ready() {
                continue;
            }

            let a = rng.gen_range(0..3);
            let b = rng.gen_range(0..3);

            let (a, b) = if a == b { (a + 1, b) } else { (a, b) };

            r#match[0].score = Score::Points(a);
            r#match[1].score = Score::Points(b);

            self.evaluate(id);
            played += 1;
        }

        log::info!("Auto-advanced {} matches", played);

        played
    }

    /// Takes the entrants from the current first round slots, so a later [`reset`] keeps them.
    ///
    /// [`reset`]: Self::reset
    pub(crate) fn adopt_first_round(&mut self) {
        let mut entrants = Vec::with_capacity(ENTRANTS);

        for r#match in &self.matches {
            if r#match.id.round() == Round::WinnerRound1 {
                entrants.extend(r#match.slots.iter().map(|slot| slot.name.clone()));
            }
        }

        self.entrants = entrants;
    }

    /// Restores the initial layout and clears the champion.
    pub fn reset(&mut self) {
        log::debug!("Resetting Bracket");

        self.matches = Self::initial_matches(&self.entrants);
        self.champion = None;
    }
}

impl Default for Bracket {
    fn default() -> Self {
        Self::new((1..=ENTRANTS).map(|index| format!("Team {}", index)))
    }
}

impl MatchStore for Bracket {
    #[inline]
    fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.index())
    }

    #[inline]
    fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id.index())
    }

    #[inline]
    fn champion(&self) -> Option<&str> {
        self.champion.as_deref()
    }

    #[inline]
    fn set_champion(&mut self, champion: Option<String>) {
        self.champion = champion;
    }
}

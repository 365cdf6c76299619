//! Pairing: turns ranked standings into the next round's matches.
//!
//! Two strategies share one preference order. Each player wants the nearest
//! player below them in the standings whom they have not met yet.
//!
//! - [`PairingAlgorithm::Greedy`] commits to that choice top-down and gives
//!   up at the first player left without a legal opponent. It can fail on a
//!   history where a different earlier choice would have worked.
//! - [`PairingAlgorithm::Exhaustive`] backtracks over the same order. Its
//!   result equals the greedy one whenever greedy succeeds, and it only fails
//!   when no rematch-free matching exists at all. Branches that strand a
//!   player, or that reach an already failed seating, are cut early.
//!
//! On an odd roster one player sits out. The bye goes to the lowest-ranked
//! player among those with the fewest byes so far.

use std::{cmp::Reverse, collections::HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
  Error, Result,
  config::{PairingAlgorithm, PairingConfig},
  player::{Match, PlayerId},
  standings::StandingRecord,
};

// ─── Output ──────────────────────────────────────────────────────────────────

/// A player's place in a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
  pub id:   PlayerId,
  pub name: String,
}

impl From<&StandingRecord> for Seat {
  fn from(record: &StandingRecord) -> Self {
    Self { id: record.player_id, name: record.name.clone() }
  }
}

/// One entry of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pairing {
  /// `first` is the higher-ranked player.
  Match { first: Seat, second: Seat },
  Bye(Seat),
}

impl Pairing {
  pub fn is_bye(&self) -> bool { matches!(self, Self::Bye(_)) }

  /// Ids of everyone seated in this pairing.
  pub fn player_ids(&self) -> Vec<PlayerId> {
    match self {
      Self::Match { first, second } => vec![first.id, second.id],
      Self::Bye(seat) => vec![seat.id],
    }
  }
}

// ─── History ─────────────────────────────────────────────────────────────────

/// The set of unordered pairs that have already played each other.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
  played: HashSet<(PlayerId, PlayerId)>,
}

impl MatchHistory {
  pub fn new() -> Self { Self::default() }

  pub fn from_matches(matches: &[Match]) -> Self {
    let mut history = Self::new();
    for m in matches {
      history.record(m.winner_id, m.loser_id);
    }
    history
  }

  /// Rebuild the history from the opponent sets carried by standings.
  pub fn from_standings(standings: &[StandingRecord]) -> Self {
    let mut history = Self::new();
    for record in standings {
      for &opponent in &record.opponents {
        history.record(record.player_id, opponent);
      }
    }
    history
  }

  pub fn record(&mut self, a: PlayerId, b: PlayerId) { self.played.insert(key(a, b)); }

  pub fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
    self.played.contains(&key(a, b))
  }

  pub fn len(&self) -> usize { self.played.len() }

  pub fn is_empty(&self) -> bool { self.played.is_empty() }
}

fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
  if a <= b { (a, b) } else { (b, a) }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Pair every player in `standings` for the next round.
///
/// `standings` must already be in rank order (see
/// [`crate::standings::compute_standings`]). Match pairings come back in
/// rank order of their first seat, followed by the bye if there is one.
pub fn generate_pairings(
  standings: &[StandingRecord],
  history: &MatchHistory,
  config: &PairingConfig,
) -> Result<Vec<Pairing>> {
  let players = standings.len();
  if players == 0 {
    return Ok(Vec::new());
  }

  let bye_options: Vec<Option<usize>> = if players % 2 == 1 {
    if !config.byes_enabled {
      return Err(Error::OddRosterWithoutBye { players });
    }
    bye_candidates(standings).into_iter().map(Some).collect()
  } else {
    vec![None]
  };

  match config.algorithm {
    PairingAlgorithm::Greedy => {
      let bye = bye_options[0];
      log_bye(standings, bye);
      let pairs = greedy(standings, history, bye)?;
      Ok(assemble(standings, pairs, bye))
    }
    PairingAlgorithm::Exhaustive => {
      for bye in bye_options {
        if let Some(pairs) = exhaustive(standings, history, bye) {
          log_bye(standings, bye);
          return Ok(assemble(standings, pairs, bye));
        }
        trace!(?bye, "no complete matching with this bye");
      }
      Err(Error::PairingImpossible { player_id: standings[0].player_id })
    }
  }
}

/// Bye recipients in order of preference: fewest byes first, and within that
/// the lowest-ranked player first.
fn bye_candidates(standings: &[StandingRecord]) -> Vec<usize> {
  let mut candidates: Vec<usize> = (0..standings.len()).collect();
  candidates.sort_by_key(|&rank| (standings[rank].byes, Reverse(rank)));
  candidates
}

fn log_bye(standings: &[StandingRecord], bye: Option<usize>) {
  if let Some(rank) = bye {
    let record = &standings[rank];
    debug!(player = %record.player_id, previous_byes = record.byes, "assigned bye");
  }
}

fn greedy(
  standings: &[StandingRecord],
  history: &MatchHistory,
  bye: Option<usize>,
) -> Result<Vec<(usize, usize)>> {
  let mut paired = vec![false; standings.len()];
  if let Some(rank) = bye {
    paired[rank] = true;
  }

  let mut pairs = Vec::with_capacity(standings.len() / 2);
  for top in 0..standings.len() {
    if paired[top] {
      continue;
    }
    paired[top] = true;
    let me = standings[top].player_id;

    let opponent = (top + 1..standings.len())
      .filter(|&rank| !paired[rank])
      .find(|&rank| {
        let them = standings[rank].player_id;
        let rematch = history.has_played(me, them);
        if rematch {
          trace!(player = %me, opponent = %them, "skipping rematch");
        }
        !rematch
      });

    match opponent {
      Some(rank) => {
        paired[rank] = true;
        pairs.push((top, rank));
      }
      None => return Err(Error::PairingImpossible { player_id: me }),
    }
  }

  Ok(pairs)
}

fn exhaustive(
  standings: &[StandingRecord],
  history: &MatchHistory,
  bye: Option<usize>,
) -> Option<Vec<(usize, usize)>> {
  let mut search = Search {
    standings,
    history,
    paired: vec![false; standings.len()],
    pairs: Vec::with_capacity(standings.len() / 2),
    dead_ends: HashSet::new(),
  };
  if let Some(rank) = bye {
    search.paired[rank] = true;
  }

  if search.run() { Some(search.pairs) } else { None }
}

/// Backtracking state for [`PairingAlgorithm::Exhaustive`].
struct Search<'a> {
  standings: &'a [StandingRecord],
  history:   &'a MatchHistory,
  paired:    Vec<bool>,
  pairs:     Vec<(usize, usize)>,
  /// Seated sets already known to admit no completion.
  dead_ends: HashSet<Vec<bool>>,
}

impl Search<'_> {
  /// Depth-first: seat the best unpaired player against each legal opponent
  /// in rank order, recursing on the rest.
  fn run(&mut self) -> bool {
    let Some(top) = self.paired.iter().position(|&p| !p) else {
      return true;
    };
    if self.dead_ends.contains(&self.paired) || self.someone_stranded() {
      return false;
    }

    self.paired[top] = true;
    let me = self.standings[top].player_id;
    for rank in top + 1..self.standings.len() {
      if self.paired[rank] || self.history.has_played(me, self.standings[rank].player_id) {
        continue;
      }
      self.paired[rank] = true;
      self.pairs.push((top, rank));
      if self.run() {
        return true;
      }
      self.pairs.pop();
      self.paired[rank] = false;
    }
    self.paired[top] = false;

    self.dead_ends.insert(self.paired.clone());
    false
  }

  /// Whether an unpaired player has met every other unpaired player.
  fn stranded(&self, rank: usize) -> bool {
    let me = self.standings[rank].player_id;
    (0..self.standings.len())
      .filter(|&other| other != rank && !self.paired[other])
      .all(|other| self.history.has_played(me, self.standings[other].player_id))
  }

  fn someone_stranded(&self) -> bool {
    (0..self.standings.len()).any(|rank| !self.paired[rank] && self.stranded(rank))
  }
}

fn assemble(
  standings: &[StandingRecord],
  pairs: Vec<(usize, usize)>,
  bye: Option<usize>,
) -> Vec<Pairing> {
  let mut round: Vec<Pairing> = pairs
    .into_iter()
    .map(|(a, b)| Pairing::Match {
      first:  Seat::from(&standings[a]),
      second: Seat::from(&standings[b]),
    })
    .collect();
  if let Some(rank) = bye {
    round.push(Pairing::Bye(Seat::from(&standings[rank])));
  }
  round
}

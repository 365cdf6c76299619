//! Standings: ranked per-player records derived from the roster and logs.
//!
//! Standings are never stored. They are recomputed from the full match and
//! bye logs every time they are needed.

use std::{
  cmp::Ordering,
  collections::{BTreeSet, HashMap},
};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  config::ByeScoring,
  player::{Bye, Match, Player, PlayerId},
};

/// One player's performance so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
  pub player_id:      PlayerId,
  pub name:           String,
  pub wins:           u32,
  pub matches_played: u32,
  pub byes:           u32,
  /// Everyone this player has already met.
  pub opponents:      BTreeSet<PlayerId>,
}

impl StandingRecord {
  fn new(player: &Player) -> Self {
    Self {
      player_id:      player.id,
      name:           player.name.clone(),
      wins:           0,
      matches_played: 0,
      byes:           0,
      opponents:      BTreeSet::new(),
    }
  }

  pub fn losses(&self) -> u32 { self.matches_played - self.wins }

  pub fn has_played(&self, other: PlayerId) -> bool { self.opponents.contains(&other) }
}

/// The standings order: wins descending, then matches played ascending, then
/// player id ascending. Total, so equal inputs always rank identically.
pub fn compare(a: &StandingRecord, b: &StandingRecord) -> Ordering {
  b.wins
    .cmp(&a.wins)
    .then_with(|| a.matches_played.cmp(&b.matches_played))
    .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Rank every player on the roster.
///
/// Returns one record per player, best first. Fails if the roster repeats an
/// id, or if a match or bye refers to someone not on it.
pub fn compute_standings(
  players: &[Player],
  matches: &[Match],
  byes: &[Bye],
  scoring: ByeScoring,
) -> Result<Vec<StandingRecord>> {
  let mut index: HashMap<PlayerId, usize> = HashMap::with_capacity(players.len());
  let mut records = Vec::with_capacity(players.len());

  for player in players {
    if index.insert(player.id, records.len()).is_some() {
      return Err(Error::DuplicatePlayer(player.id));
    }
    records.push(StandingRecord::new(player));
  }

  let slot = |id: PlayerId| index.get(&id).copied().ok_or(Error::UnknownPlayer(id));

  for m in matches {
    if m.winner_id == m.loser_id {
      return Err(Error::SelfMatch(m.winner_id));
    }
    let winner = slot(m.winner_id)?;
    let loser = slot(m.loser_id)?;

    let w = &mut records[winner];
    w.wins += 1;
    w.matches_played += 1;
    w.opponents.insert(m.loser_id);

    let l = &mut records[loser];
    l.matches_played += 1;
    l.opponents.insert(m.winner_id);
  }

  for bye in byes {
    let r = &mut records[slot(bye.player_id)?];
    r.byes += 1;
    if scoring == ByeScoring::Win {
      r.wins += 1;
      r.matches_played += 1;
    }
  }

  records.sort_by(compare);
  Ok(records)
}

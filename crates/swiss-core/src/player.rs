//! Roster and match-log types.
//!
//! Players, matches and byes are the only persisted records. They are owned by
//! the store; standings and pairings are derived from them on every read.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// A store-assigned player identifier.
///
/// Ids are totally ordered; the ordering is the last standings tie-break.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

impl From<i64> for PlayerId {
  fn from(id: i64) -> Self { Self(id) }
}

impl FromStr for PlayerId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

/// A registered player. Immutable once created; names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  pub id:   PlayerId,
  pub name: String,
}

impl Player {
  pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into() }
  }
}

// ─── Match log ───────────────────────────────────────────────────────────────

/// The outcome of one completed match. There are no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
  pub winner_id: PlayerId,
  pub loser_id:  PlayerId,
}

impl Match {
  pub fn new(winner_id: impl Into<PlayerId>, loser_id: impl Into<PlayerId>) -> Self {
    Self { winner_id: winner_id.into(), loser_id: loser_id.into() }
  }

  pub fn involves(&self, id: PlayerId) -> bool {
    self.winner_id == id || self.loser_id == id
  }

  /// The other participant, or `None` if `id` did not play in this match.
  pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
    if self.winner_id == id {
      Some(self.loser_id)
    } else if self.loser_id == id {
      Some(self.winner_id)
    } else {
      None
    }
  }
}

/// A round sat out on a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bye {
  pub player_id: PlayerId,
}

impl Bye {
  pub fn new(player_id: impl Into<PlayerId>) -> Self { Self { player_id: player_id.into() } }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opponent_of_either_side() {
    let m = Match::new(1, 2);
    assert_eq!(m.opponent_of(PlayerId(1)), Some(PlayerId(2)));
    assert_eq!(m.opponent_of(PlayerId(2)), Some(PlayerId(1)));
    assert_eq!(m.opponent_of(PlayerId(3)), None);
    assert!(m.involves(PlayerId(2)));
    assert!(!m.involves(PlayerId(3)));
  }

  #[test]
  fn player_id_parses_and_serialises_as_integer() {
    assert_eq!(" 42 ".parse::<PlayerId>().unwrap(), PlayerId(42));
    assert!("forty-two".parse::<PlayerId>().is_err());
    assert_eq!(serde_json::to_string(&PlayerId(7)).unwrap(), "7");
  }
}

//! Error types for `swiss-core`.

use thiserror::Error;

use crate::player::PlayerId;

#[derive(Debug, Error)]
pub enum Error {
  /// A match or bye refers to a player that is not on the roster.
  #[error("match log references unknown player {0}")]
  UnknownPlayer(PlayerId),

  #[error("player {0} is recorded as playing against themselves")]
  SelfMatch(PlayerId),

  #[error("player {0} appears more than once in the roster")]
  DuplicatePlayer(PlayerId),

  /// No legal opponent is left for `player_id`. Needs organiser
  /// intervention; recomputing yields the same result.
  #[error("no legal opponent left for player {player_id}")]
  PairingImpossible { player_id: PlayerId },

  #[error("roster has an odd number of players ({players}) and byes are disabled")]
  OddRosterWithoutBye { players: usize },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// True for errors caused by an inconsistent roster or match log.
  pub fn is_invalid_state(&self) -> bool {
    matches!(
      self,
      Self::UnknownPlayer(_) | Self::SelfMatch(_) | Self::DuplicatePlayer(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

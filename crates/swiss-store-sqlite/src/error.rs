//! Error type for `swiss-store-sqlite`.

use swiss_core::player::PlayerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("player not found: {0}")]
  UnknownPlayer(PlayerId),

  #[error("player {0} cannot play against themselves")]
  SelfMatch(PlayerId),

  /// Attempted to clear the roster while the logs still reference it.
  #[error("cannot reset players: {references} matches or byes still reference them")]
  PlayersHaveMatches { references: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

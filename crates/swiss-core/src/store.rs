//! The `MatchStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `swiss-store-sqlite`).
//! Standings and pairing never touch it directly; they work on snapshots
//! loaded through [`crate::round`].

use std::future::Future;

use crate::player::{Bye, Match, Player, PlayerId};

/// Abstraction over the durable roster, match log and bye log.
///
/// The logs are append-only apart from the bulk resets. The store does not
/// reject rematches; keeping pairs unique is the pairing engine's job.
///
/// Serialising a whole round (read, pair, report) against other writers is
/// the caller's responsibility.
pub trait MatchStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Roster ────────────────────────────────────────────────────────────

  /// Add a player. The store assigns the id.
  fn register_player(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + '_;

  fn count_players(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// All players, in registration order.
  fn list_players(&self) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send + '_;

  // ── Logs ──────────────────────────────────────────────────────────────

  /// All reported matches, in reporting order.
  fn list_matches(&self) -> impl Future<Output = Result<Vec<Match>, Self::Error>> + Send + '_;

  /// All awarded byes, in award order.
  fn list_byes(&self) -> impl Future<Output = Result<Vec<Bye>, Self::Error>> + Send + '_;

  /// Record a match outcome. Both players must exist and must differ.
  fn insert_match(
    &self,
    winner_id: PlayerId,
    loser_id: PlayerId,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  /// Record that `player_id` sat out a round on a bye.
  fn record_bye(
    &self,
    player_id: PlayerId,
  ) -> impl Future<Output = Result<Bye, Self::Error>> + Send + '_;

  // ── Resets ────────────────────────────────────────────────────────────

  /// Clear the match log and the bye log.
  fn reset_matches(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Clear the roster. Fails while any match or bye still references it.
  fn reset_players(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

//! Store-backed entry points: load a snapshot, then rank and pair it.

use tracing::info;

use crate::{
  Error, Result,
  config::TournamentConfig,
  pairing::{MatchHistory, Pairing, generate_pairings},
  player::{Bye, Match, Player},
  standings::{StandingRecord, compute_standings},
  store::MatchStore,
};

/// Everything the calculations read, captured from a store in one pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub players: Vec<Player>,
  pub matches: Vec<Match>,
  pub byes:    Vec<Bye>,
}

impl Snapshot {
  pub async fn load<S: MatchStore>(store: &S) -> Result<Self> {
    Ok(Self {
      players: store.list_players().await.map_err(store_error)?,
      matches: store.list_matches().await.map_err(store_error)?,
      byes:    store.list_byes().await.map_err(store_error)?,
    })
  }

  pub fn standings(&self, config: &TournamentConfig) -> Result<Vec<StandingRecord>> {
    compute_standings(&self.players, &self.matches, &self.byes, config.bye_scoring)
  }

  pub fn pairings(&self, config: &TournamentConfig) -> Result<Vec<Pairing>> {
    let standings = self.standings(config)?;
    let history = MatchHistory::from_matches(&self.matches);
    generate_pairings(&standings, &history, &config.pairing)
  }
}

/// Current standings, best first.
pub async fn standings<S: MatchStore>(
  store: &S,
  config: &TournamentConfig,
) -> Result<Vec<StandingRecord>> {
  Snapshot::load(store).await?.standings(config)
}

/// Pairings for the next round. Nothing is written back; recording the
/// results (and the bye, if any) is up to the caller.
pub async fn swiss_pairings<S: MatchStore>(
  store: &S,
  config: &TournamentConfig,
) -> Result<Vec<Pairing>> {
  let snapshot = Snapshot::load(store).await?;
  let pairings = snapshot.pairings(config)?;
  info!(
    players = snapshot.players.len(),
    matches = snapshot.matches.len(),
    pairings = pairings.len(),
    algorithm = %config.pairing.algorithm,
    "generated pairings"
  );
  Ok(pairings)
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

//! [`SqliteStore`]: the SQLite implementation of [`MatchStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use swiss_core::{
  player::{Bye, Match, Player, PlayerId},
  store::MatchStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tournament store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!("schema initialised");
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn player_exists(conn: &rusqlite::Connection, id: PlayerId) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM players WHERE player_id = ?1",
        rusqlite::params![id.0],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

/// The first of `ids` missing from the roster, if any.
fn first_missing(
  conn: &rusqlite::Connection,
  ids: &[PlayerId],
) -> rusqlite::Result<Option<PlayerId>> {
  for &id in ids {
    if !player_exists(conn, id)? {
      return Ok(Some(id));
    }
  }
  Ok(None)
}

// ─── MatchStore impl ─────────────────────────────────────────────────────────

impl MatchStore for SqliteStore {
  type Error = Error;

  // ── Roster ────────────────────────────────────────────────────────────────

  async fn register_player(&self, name: String) -> Result<Player> {
    let player = self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO players (name) VALUES (?1)", rusqlite::params![name])?;
        Ok(Player { id: PlayerId(conn.last_insert_rowid()), name })
      })
      .await?;

    debug!(player = %player.id, name = %player.name, "registered player");
    Ok(player)
  }

  async fn count_players(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT count(*) FROM players", [], |r| r.get(0))?))
      .await?;
    Ok(count as usize)
  }

  async fn list_players(&self) -> Result<Vec<Player>> {
    let players = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT player_id, name FROM players ORDER BY player_id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Player { id: PlayerId(row.get(0)?), name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(players)
  }

  // ── Logs ──────────────────────────────────────────────────────────────────

  async fn list_matches(&self) -> Result<Vec<Match>> {
    let matches = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT winner_id, loser_id FROM matches ORDER BY match_id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Match { winner_id: PlayerId(row.get(0)?), loser_id: PlayerId(row.get(1)?) })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(matches)
  }

  async fn list_byes(&self) -> Result<Vec<Bye>> {
    let byes = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT player_id FROM byes ORDER BY bye_id")?;
        let rows = stmt
          .query_map([], |row| Ok(Bye { player_id: PlayerId(row.get(0)?) }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(byes)
  }

  async fn insert_match(&self, winner_id: PlayerId, loser_id: PlayerId) -> Result<Match> {
    if winner_id == loser_id {
      return Err(Error::SelfMatch(winner_id));
    }

    let missing = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(id) = first_missing(&tx, &[winner_id, loser_id])? {
          return Ok(Some(id));
        }
        tx.execute(
          "INSERT INTO matches (winner_id, loser_id) VALUES (?1, ?2)",
          rusqlite::params![winner_id.0, loser_id.0],
        )?;
        tx.commit()?;
        Ok(None)
      })
      .await?;

    if let Some(id) = missing {
      return Err(Error::UnknownPlayer(id));
    }

    debug!(winner = %winner_id, loser = %loser_id, "reported match");
    Ok(Match { winner_id, loser_id })
  }

  async fn record_bye(&self, player_id: PlayerId) -> Result<Bye> {
    let missing = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(id) = first_missing(&tx, &[player_id])? {
          return Ok(Some(id));
        }
        tx.execute("INSERT INTO byes (player_id) VALUES (?1)", rusqlite::params![player_id.0])?;
        tx.commit()?;
        Ok(None)
      })
      .await?;

    if let Some(id) = missing {
      return Err(Error::UnknownPlayer(id));
    }

    debug!(player = %player_id, "recorded bye");
    Ok(Bye { player_id })
  }

  // ── Resets ────────────────────────────────────────────────────────────────

  async fn reset_matches(&self) -> Result<()> {
    let (matches, byes) = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let matches = tx.execute("DELETE FROM matches", [])?;
        let byes = tx.execute("DELETE FROM byes", [])?;
        tx.commit()?;
        Ok((matches, byes))
      })
      .await?;

    debug!(matches, byes, "cleared match log");
    Ok(())
  }

  async fn reset_players(&self) -> Result<()> {
    let outcome = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let references: i64 = tx.query_row(
          "SELECT (SELECT count(*) FROM matches) + (SELECT count(*) FROM byes)",
          [],
          |r| r.get(0),
        )?;
        if references > 0 {
          return Ok(Err(references as usize));
        }
        let removed = tx.execute("DELETE FROM players", [])?;
        tx.commit()?;
        Ok(Ok(removed))
      })
      .await?;

    match outcome {
      Ok(removed) => {
        debug!(removed, "cleared roster");
        Ok(())
      }
      Err(references) => Err(Error::PlayersHaveMatches { references }),
    }
  }
}

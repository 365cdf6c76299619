//! SQL schema for the Swiss tournament SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS players (
    player_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL
);

-- Append-only; cleared only by a bulk reset.
-- No UNIQUE on the pair: rematch avoidance belongs to pairing.
CREATE TABLE IF NOT EXISTS matches (
    match_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    winner_id INTEGER NOT NULL REFERENCES players(player_id),
    loser_id  INTEGER NOT NULL REFERENCES players(player_id),
    CHECK (winner_id != loser_id)
);

CREATE TABLE IF NOT EXISTS byes (
    bye_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id INTEGER NOT NULL REFERENCES players(player_id)
);

CREATE INDEX IF NOT EXISTS matches_winner_idx ON matches(winner_id);
CREATE INDEX IF NOT EXISTS matches_loser_idx  ON matches(loser_id);
CREATE INDEX IF NOT EXISTS byes_player_idx    ON byes(player_id);

PRAGMA user_version = 1;
";

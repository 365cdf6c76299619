//! `swiss`: command-line front end for a Swiss-system tournament.
//!
//! Reads `swiss.toml` (or the path given with `--config`), opens the SQLite
//! store, and runs a single command against it.
//!
//! # Usage
//!
//! ```text
//! swiss register "Ana Lima"
//! swiss pairings --record-bye
//! swiss report 1 2
//! swiss standings --json
//! ```

mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use settings::{Settings, expand_tilde};
use swiss_core::{
  config::PairingAlgorithm,
  pairing::Pairing,
  player::PlayerId,
  round,
  store::MatchStore,
};
use swiss_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Swiss-system tournament pairing")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "swiss.toml")]
  config: PathBuf,

  /// SQLite database path; overrides `store_path` from the config.
  #[arg(long, value_name = "PATH")]
  store: Option<PathBuf>,

  /// Print JSON instead of text tables.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Register a new player.
  Register { name: String },
  /// Print the number of registered players.
  Count,
  /// List registered players.
  Players,
  /// Record the outcome of a match.
  Report { winner: PlayerId, loser: PlayerId },
  /// Record that a player sat out a round.
  Bye { player: PlayerId },
  /// Print the current standings.
  Standings,
  /// Compute pairings for the next round.
  Pairings {
    /// Override the configured pairing algorithm.
    #[arg(long)]
    algorithm:  Option<PairingAlgorithm>,
    /// Fail on an odd roster instead of awarding a bye.
    #[arg(long)]
    no_byes:    bool,
    /// Persist the awarded bye, if any.
    #[arg(long)]
    record_bye: bool,
  },
  /// Delete every match and bye.
  ResetMatches,
  /// Delete every player. Matches must be reset first.
  ResetPlayers,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = cli.store {
    settings.store_path = store;
  }
  let store_path = expand_tilde(&settings.store_path);

  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let output = run(&store, settings, cli.command, cli.json).await?;
  if !output.is_empty() {
    print!("{output}");
    if !output.ends_with('\n') {
      println!();
    }
  }
  Ok(())
}

async fn run(
  store: &SqliteStore,
  mut settings: Settings,
  command: Command,
  json: bool,
) -> anyhow::Result<String> {
  match command {
    Command::Register { name } => {
      let player = store.register_player(name).await?;
      tracing::info!(id = %player.id, "registered {}", player.name);
      if json { render::json(&player) } else { Ok(player.id.to_string()) }
    }

    Command::Count => Ok(store.count_players().await?.to_string()),

    Command::Players => {
      let players = store.list_players().await?;
      if json { render::json(&players) } else { Ok(render::players(&players)) }
    }

    Command::Report { winner, loser } => {
      let m = store
        .insert_match(winner, loser)
        .await
        .with_context(|| format!("failed to report {winner} beating {loser}"))?;
      if json { render::json(&m) } else { Ok(String::new()) }
    }

    Command::Bye { player } => {
      let bye = store.record_bye(player).await?;
      if json { render::json(&bye) } else { Ok(String::new()) }
    }

    Command::Standings => {
      let records = round::standings(store, &settings.tournament)
        .await
        .context("failed to compute standings")?;
      if json { render::json(&records) } else { Ok(render::standings(&records)) }
    }

    Command::Pairings { algorithm, no_byes, record_bye } => {
      let pairing = &mut settings.tournament.pairing;
      if let Some(algorithm) = algorithm {
        pairing.algorithm = algorithm;
      }
      if no_byes {
        pairing.byes_enabled = false;
      }

      let pairings = round::swiss_pairings(store, &settings.tournament)
        .await
        .context("failed to generate pairings")?;

      if record_bye
        && let Some(Pairing::Bye(seat)) = pairings.iter().find(|p| p.is_bye())
      {
        store.record_bye(seat.id).await?;
        tracing::info!(player = %seat.id, "recorded bye for {}", seat.name);
      }

      if json { render::json(&pairings) } else { Ok(render::pairings(&pairings)) }
    }

    Command::ResetMatches => {
      store.reset_matches().await?;
      Ok(String::new())
    }

    Command::ResetPlayers => {
      store.reset_players().await?;
      Ok(String::new())
    }
  }
}

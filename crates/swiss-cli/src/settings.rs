//! Runtime settings: built-in defaults, then the TOML file, then `SWISS_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use swiss_core::config::TournamentConfig;

pub const ENV_PREFIX: &str = "SWISS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub tournament: TournamentConfig,
}

fn default_store_path() -> PathBuf { PathBuf::from("tournament.db") }

impl Settings {
  /// Load from `path` (optional on disk) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = Config::builder().add_source(File::from(path).required(false));
    Self::finish(builder)
  }

  fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .add_source(
        Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

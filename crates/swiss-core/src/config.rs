//! Tournament configuration.
//!
//! Every type deserialises with defaults for missing keys, so an empty config
//! file (or none at all) yields a usable [`TournamentConfig`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which matching strategy [`crate::pairing::generate_pairings`] uses.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PairingAlgorithm {
  /// Nearest-neighbour scan down the standings. Fast; can fail on histories
  /// a full search would resolve.
  #[default]
  Greedy,
  /// Backtracking search. Succeeds whenever any valid matching exists.
  Exhaustive,
}

/// How a bye is scored in the standings.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ByeScoring {
  /// Neither a win nor a match played.
  #[default]
  Rest,
  /// One win and one match played.
  Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
  pub algorithm:    PairingAlgorithm,
  /// When false, an odd roster is an error instead of producing a bye.
  pub byes_enabled: bool,
}

impl Default for PairingConfig {
  fn default() -> Self {
    Self { algorithm: PairingAlgorithm::default(), byes_enabled: true }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
  pub pairing:     PairingConfig,
  pub bye_scoring: ByeScoring,
}

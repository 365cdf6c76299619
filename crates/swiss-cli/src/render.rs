//! Plain-text and JSON output for the CLI.

use serde::Serialize;
use swiss_core::{pairing::Pairing, player::Player, standings::StandingRecord};

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
  Ok(serde_json::to_string_pretty(value)?)
}

pub fn players(players: &[Player]) -> String {
  players.iter().map(|p| format!("{:>4}  {}\n", p.id, p.name)).collect()
}

pub fn standings(records: &[StandingRecord]) -> String {
  let width = name_width(records.iter().map(|r| r.name.as_str()));
  let mut out = format!(
    "{:>4}  {:>4}  {:<width$}  {:>4}  {:>4}  {:>4}  {:>4}\n",
    "rank", "id", "name", "w", "l", "m", "bye"
  );
  for (rank, r) in records.iter().enumerate() {
    out.push_str(&format!(
      "{:>4}  {:>4}  {:<width$}  {:>4}  {:>4}  {:>4}  {:>4}\n",
      rank + 1,
      r.player_id,
      r.name,
      r.wins,
      r.losses(),
      r.matches_played,
      r.byes,
    ));
  }
  out
}

pub fn pairings(round: &[Pairing]) -> String {
  let width = name_width(round.iter().filter_map(|p| match p {
    Pairing::Match { first, .. } => Some(first.name.as_str()),
    Pairing::Bye(_) => None,
  }));
  round
    .iter()
    .enumerate()
    .map(|(table, pairing)| match pairing {
      Pairing::Match { first, second } => format!(
        "{:>3}.  {:>4} {:<width$}  vs  {:>4} {}\n",
        table + 1,
        first.id,
        first.name,
        second.id,
        second.name,
      ),
      Pairing::Bye(seat) => format!("bye:  {:>4} {}\n", seat.id, seat.name),
    })
    .collect()
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
  names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}

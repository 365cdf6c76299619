//! Integration tests for `SqliteStore` against an in-memory database.

use swiss_core::{
  config::{PairingAlgorithm, TournamentConfig},
  pairing::Pairing,
  player::{Match, PlayerId},
  round,
  store::MatchStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn store_with(names: &[&str]) -> (SqliteStore, Vec<PlayerId>) {
  let s = store().await;
  let mut ids = Vec::new();
  for name in names {
    ids.push(s.register_player((*name).to_owned()).await.unwrap().id);
  }
  (s, ids)
}

fn seated(round: &[Pairing]) -> Vec<Vec<PlayerId>> {
  round.iter().map(Pairing::player_ids).collect()
}

/// Report every match of a round with the higher seat winning.
async fn play_round(s: &SqliteStore, round: &[Pairing]) {
  for pairing in round {
    match pairing {
      Pairing::Match { first, second } => {
        s.insert_match(first.id, second.id).await.unwrap();
      }
      Pairing::Bye(seat) => {
        s.record_bye(seat.id).await.unwrap();
      }
    }
  }
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_list_players() {
  let s = store().await;
  assert_eq!(s.count_players().await.unwrap(), 0);

  let ana = s.register_player("Ana".into()).await.unwrap();
  let ben = s.register_player("Ben".into()).await.unwrap();
  assert_ne!(ana.id, ben.id);

  let players = s.list_players().await.unwrap();
  assert_eq!(players, vec![ana, ben]);
  assert_eq!(s.count_players().await.unwrap(), 2);
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
  let s = store().await;
  s.register_player("Sam".into()).await.unwrap();
  s.register_player("Sam".into()).await.unwrap();
  assert_eq!(s.count_players().await.unwrap(), 2);
}

// ─── Match log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_match_and_list_in_order() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy"]).await;

  s.insert_match(ids[0], ids[1]).await.unwrap();
  s.insert_match(ids[2], ids[0]).await.unwrap();

  let matches = s.list_matches().await.unwrap();
  assert_eq!(matches, vec![Match::new(ids[0], ids[1]), Match::new(ids[2], ids[0])]);
}

#[tokio::test]
async fn insert_match_unknown_player_errors() {
  let (s, ids) = store_with(&["Ana"]).await;
  let err = s.insert_match(ids[0], PlayerId(99)).await.unwrap_err();
  assert!(matches!(err, crate::Error::UnknownPlayer(PlayerId(99))));
  assert!(s.list_matches().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_self_match_errors() {
  let (s, ids) = store_with(&["Ana"]).await;
  let err = s.insert_match(ids[0], ids[0]).await.unwrap_err();
  assert!(matches!(err, crate::Error::SelfMatch(_)));
}

#[tokio::test]
async fn rematch_is_not_rejected_by_store() {
  let (s, ids) = store_with(&["Ana", "Ben"]).await;
  s.insert_match(ids[0], ids[1]).await.unwrap();
  s.insert_match(ids[1], ids[0]).await.unwrap();
  assert_eq!(s.list_matches().await.unwrap().len(), 2);
}

#[tokio::test]
async fn record_bye_and_list() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy"]).await;
  s.record_bye(ids[2]).await.unwrap();

  let byes = s.list_byes().await.unwrap();
  assert_eq!(byes.len(), 1);
  assert_eq!(byes[0].player_id, ids[2]);

  let err = s.record_bye(PlayerId(42)).await.unwrap_err();
  assert!(matches!(err, crate::Error::UnknownPlayer(PlayerId(42))));
}

// ─── Resets ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_matches_clears_matches_and_byes() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy"]).await;
  s.insert_match(ids[0], ids[1]).await.unwrap();
  s.record_bye(ids[2]).await.unwrap();

  s.reset_matches().await.unwrap();

  assert!(s.list_matches().await.unwrap().is_empty());
  assert!(s.list_byes().await.unwrap().is_empty());
  assert_eq!(s.count_players().await.unwrap(), 3);
}

#[tokio::test]
async fn reset_players_refused_while_referenced() {
  let (s, ids) = store_with(&["Ana", "Ben"]).await;
  s.insert_match(ids[0], ids[1]).await.unwrap();

  let err = s.reset_players().await.unwrap_err();
  assert!(matches!(err, crate::Error::PlayersHaveMatches { references: 1 }));
  assert_eq!(s.count_players().await.unwrap(), 2);

  s.reset_matches().await.unwrap();
  s.reset_players().await.unwrap();
  assert_eq!(s.count_players().await.unwrap(), 0);
}

// ─── Full rounds ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_two_rounds_follow_standings() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy", "Dee"]).await;
  let config = TournamentConfig::default();

  let first = round::swiss_pairings(&s, &config).await.unwrap();
  assert_eq!(seated(&first), vec![vec![ids[0], ids[1]], vec![ids[2], ids[3]]]);
  play_round(&s, &first).await;

  let table = round::standings(&s, &config).await.unwrap();
  let order: Vec<_> = table.iter().map(|r| r.player_id).collect();
  assert_eq!(order, vec![ids[0], ids[2], ids[1], ids[3]]);
  assert_eq!(table.iter().map(|r| r.wins).sum::<u32>(), 2);

  let second = round::swiss_pairings(&s, &config).await.unwrap();
  assert_eq!(seated(&second), vec![vec![ids[0], ids[2]], vec![ids[1], ids[3]]]);
}

#[tokio::test]
async fn four_players_play_everyone_once_then_stop() {
  let (s, _) = store_with(&["Ana", "Ben", "Cy", "Dee"]).await;
  let config = TournamentConfig::default();

  for _ in 0..3 {
    let pairings = round::swiss_pairings(&s, &config).await.unwrap();
    play_round(&s, &pairings).await;
  }

  let history = swiss_core::pairing::MatchHistory::from_matches(&s.list_matches().await.unwrap());
  assert_eq!(history.len(), 6);

  let err = round::swiss_pairings(&s, &config).await.unwrap_err();
  assert!(matches!(err, swiss_core::Error::PairingImpossible { .. }));
}

#[tokio::test]
async fn five_players_rotate_the_bye() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy", "Dee", "Eli"]).await;
  let config = TournamentConfig::default();

  let first = round::swiss_pairings(&s, &config).await.unwrap();
  assert_eq!(first.last(), Some(&Pairing::Bye(seat(&s, ids[4]).await)));
  play_round(&s, &first).await;

  let second = round::swiss_pairings(&s, &config).await.unwrap();
  let bye = second.iter().find(|p| p.is_bye()).unwrap();
  assert_ne!(bye.player_ids(), vec![ids[4]]);
  play_round(&s, &second).await;

  let byes = s.list_byes().await.unwrap();
  assert_eq!(byes.len(), 2);
  assert_ne!(byes[0].player_id, byes[1].player_id);
}

#[tokio::test]
async fn exhaustive_config_resolves_greedy_dead_end() {
  let (s, ids) = store_with(&["Ana", "Ben", "Cy", "Dee"]).await;
  // Ranked Ana, Ben, Cy, Dee. Greedy seats Ana v Ben and is left with Cy v
  // Dee, who already met.
  s.insert_match(ids[0], ids[2]).await.unwrap();
  s.insert_match(ids[1], ids[3]).await.unwrap();
  s.insert_match(ids[2], ids[3]).await.unwrap();

  let mut config = TournamentConfig::default();
  let err = round::swiss_pairings(&s, &config).await.unwrap_err();
  assert!(matches!(err, swiss_core::Error::PairingImpossible { player_id } if player_id == ids[2]));

  config.pairing.algorithm = PairingAlgorithm::Exhaustive;
  let pairings = round::swiss_pairings(&s, &config).await.unwrap();
  assert_eq!(seated(&pairings), vec![vec![ids[0], ids[3]], vec![ids[1], ids[2]]]);
}

async fn seat(s: &SqliteStore, id: PlayerId) -> swiss_core::pairing::Seat {
  let player = s
    .list_players()
    .await
    .unwrap()
    .into_iter()
    .find(|p| p.id == id)
    .unwrap();
  swiss_core::pairing::Seat { id: player.id, name: player.name }
}

//! Integration tests for the tournament lifecycle
//!
//! These tests drive the public `SwissTournament` API from tournament creation
//! through match reporting to next-round pairings, using the in-memory
//! repository.

use std::collections::HashSet;

use swiss_tournament::{Scope, SwissTournament, TournamentError, ValidationError};

/// Helper to create a service with one named tournament
async fn setup_tournament(name: &str) -> (SwissTournament, Scope) {
    let swiss = SwissTournament::in_memory();
    let id = swiss
        .create_tournament(name)
        .await
        .expect("Failed to create tournament");
    (swiss, Scope::from(id))
}

/// Helper to register players and return their ids in registration order
async fn register_all(swiss: &SwissTournament, scope: &Scope, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let player = swiss
            .register_player(scope, name)
            .await
            .expect("Failed to register player")
            .expect("Non-empty name should register");
        ids.push(player.id);
    }
    ids
}

#[tokio::test]
async fn test_count_after_registering_two_players() {
    let (swiss, scope) = setup_tournament("Count Cup").await;
    register_all(&swiss, &scope, &["Madhu", "Bhargav"]).await;

    assert_eq!(swiss.count_players(&scope).await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_players_resets_count() {
    let (swiss, scope) = setup_tournament("Reset Cup").await;
    register_all(&swiss, &scope, &["Alice", "Bob", "Carol"]).await;

    swiss.delete_players(&scope).await.unwrap();

    assert_eq!(swiss.count_players(&scope).await.unwrap(), 0);
    assert!(swiss.player_standings(&scope).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_standings_before_any_match() {
    let (swiss, scope) = setup_tournament("Fresh Cup").await;
    register_all(&swiss, &scope, &["Alice", "Bob", "Carol", "Dave", "Eve"]).await;

    let standings = swiss.player_standings(&scope).await.unwrap();

    assert_eq!(standings.len(), 5);
    for standing in &standings {
        assert_eq!(standing.wins, 0);
        assert_eq!(standing.matches, 0);
    }
}

#[tokio::test]
async fn test_report_match_updates_only_its_scope() {
    let swiss = SwissTournament::in_memory();
    let first = Scope::from(swiss.create_tournament("First").await.unwrap());
    let second = Scope::from(swiss.create_tournament("Second").await.unwrap());

    let a = register_all(&swiss, &first, &["Alice", "Bob"]).await;
    register_all(&swiss, &second, &["Carol", "Dave"]).await;
    let second_before = swiss.player_standings(&second).await.unwrap();

    swiss
        .report_match(&first, Some(a[0]), Some(a[1]))
        .await
        .unwrap();

    let standings = swiss.player_standings(&first).await.unwrap();
    let winner = standings.iter().find(|s| s.player_id == a[0]).unwrap();
    let loser = standings.iter().find(|s| s.player_id == a[1]).unwrap();
    assert_eq!((winner.wins, winner.matches), (1, 1));
    assert_eq!((loser.wins, loser.matches), (0, 1));

    assert_eq!(swiss.player_standings(&second).await.unwrap(), second_before);
}

#[tokio::test]
async fn test_concrete_four_player_round() {
    let (swiss, scope) = setup_tournament("Scenario").await;
    let ids = register_all(&swiss, &scope, &["Alice", "Bob", "Carol", "Dave"]).await;
    let (alice, bob, carol, dave) = (ids[0], ids[1], ids[2], ids[3]);
    assert_eq!(ids, vec![1, 2, 3, 4], "Storage assigns ids in registration order");

    swiss.report_match(&scope, Some(alice), Some(bob)).await.unwrap();
    swiss.report_match(&scope, Some(carol), Some(dave)).await.unwrap();

    let standings: Vec<_> = swiss
        .player_standings(&scope)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.name, s.wins, s.matches))
        .collect();
    assert_eq!(
        standings,
        vec![
            ("Alice".to_string(), 1, 1),
            ("Carol".to_string(), 1, 1),
            ("Bob".to_string(), 0, 1),
            ("Dave".to_string(), 0, 1),
        ]
    );

    let pairings: Vec<_> = swiss
        .swiss_pairings(&scope)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.into_tuple())
        .collect();
    assert_eq!(
        pairings,
        vec![
            (1, "Alice".to_string(), 3, "Carol".to_string()),
            (2, "Bob".to_string(), 4, "Dave".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_pairings_cover_every_player_once() {
    let (swiss, scope) = setup_tournament("Coverage").await;
    let ids = register_all(
        &swiss,
        &scope,
        &["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"],
    )
    .await;

    // Round one, then a few results from round two
    for pair in ids.chunks(2) {
        swiss.report_match(&scope, Some(pair[0]), Some(pair[1])).await.unwrap();
    }
    swiss.report_match(&scope, Some(ids[2]), Some(ids[0])).await.unwrap();
    swiss.report_match(&scope, Some(ids[7]), Some(ids[5])).await.unwrap();

    let standings = swiss.player_standings(&scope).await.unwrap();
    let pairings = swiss.swiss_pairings(&scope).await.unwrap();
    assert_eq!(pairings.len(), ids.len() / 2);

    let mut seen = HashSet::new();
    for (k, pairing) in pairings.iter().enumerate() {
        assert_eq!(pairing.player1_id, standings[2 * k].player_id);
        assert_eq!(pairing.player2_id, standings[2 * k + 1].player_id);
        assert!(seen.insert(pairing.player1_id));
        assert!(seen.insert(pairing.player2_id));
    }
    assert_eq!(seen, ids.into_iter().collect::<HashSet<_>>());
}

#[tokio::test]
async fn test_odd_player_count_has_no_pairings() {
    let (swiss, scope) = setup_tournament("Odd").await;
    register_all(&swiss, &scope, &["Alice", "Bob", "Carol"]).await;

    assert!(swiss.swiss_pairings(&scope).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_name_gets_distinct_ids() {
    let swiss = SwissTournament::in_memory();

    let first = swiss.create_tournament("My Cup").await.unwrap();
    let second = swiss.create_tournament("My Cup").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(swiss.list_tournaments().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creation_with_same_name() {
    let swiss = SwissTournament::in_memory();

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let swiss = swiss.clone();
            tokio::spawn(async move { swiss.create_tournament("My Cup").await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().expect("Creation should not fail");
        assert!(ids.insert(id), "Tournament ids must be unique");
    }
    assert_eq!(ids.len(), 12);
}

#[tokio::test]
async fn test_recreating_after_deletions_never_runs_out_of_ids() {
    let swiss = SwissTournament::in_memory();
    let mut ids = Vec::new();
    for _ in 0..32 {
        ids.push(swiss.create_tournament("My Cup").await.unwrap());
    }
    for id in &ids[..16] {
        swiss.delete_tournament(&Scope::from(id)).await.unwrap();
    }

    for _ in 0..4 {
        let id = swiss
            .create_tournament("My Cup")
            .await
            .expect("Creation should not fail after deletions");
        assert!(!ids.contains(&id));
        ids.push(id);
    }
    assert_eq!(swiss.list_tournaments().await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_clearing_global_scope_removes_players_and_matches() {
    let swiss = SwissTournament::in_memory();
    let kept = Scope::from(swiss.create_tournament("Kept").await.unwrap());
    let global = register_all(&swiss, &Scope::Global, &["Alice", "Bob"]).await;
    let named = register_all(&swiss, &kept, &["Carol", "Dave"]).await;
    swiss.report_match(&Scope::Global, Some(global[0]), Some(global[1])).await.unwrap();
    swiss.report_match(&kept, Some(named[0]), Some(named[1])).await.unwrap();

    assert!(!swiss.delete_tournament(&Scope::Global).await.unwrap());

    assert_eq!(swiss.count_players(&Scope::Global).await.unwrap(), 0);
    assert_eq!(swiss.delete_matches(&Scope::Global).await.unwrap(), 0);
    let standings = swiss.player_standings(&kept).await.unwrap();
    assert_eq!(standings.iter().map(|s| s.matches).sum::<u32>(), 2);
}

#[tokio::test]
async fn test_delete_matches_is_scoped() {
    let swiss = SwissTournament::in_memory();
    let first = Scope::from(swiss.create_tournament("First").await.unwrap());
    let second = Scope::from(swiss.create_tournament("Second").await.unwrap());

    let a = register_all(&swiss, &first, &["Alice", "Bob"]).await;
    let b = register_all(&swiss, &second, &["Carol", "Dave"]).await;
    swiss.report_match(&first, Some(a[0]), Some(a[1])).await.unwrap();
    swiss.report_match(&second, Some(b[1]), Some(b[0])).await.unwrap();
    let second_before = swiss.player_standings(&second).await.unwrap();

    assert_eq!(swiss.delete_matches(&first).await.unwrap(), 1);

    let first_after = swiss.player_standings(&first).await.unwrap();
    assert!(first_after.iter().all(|s| s.matches == 0));
    assert_eq!(swiss.player_standings(&second).await.unwrap(), second_before);
}

#[tokio::test]
async fn test_delete_tournament_cascades() {
    let swiss = SwissTournament::in_memory();
    let doomed_id = swiss.create_tournament("Doomed").await.unwrap();
    let doomed = Scope::from(&doomed_id);
    let kept = Scope::from(swiss.create_tournament("Kept").await.unwrap());

    let a = register_all(&swiss, &doomed, &["Alice", "Bob"]).await;
    register_all(&swiss, &kept, &["Carol"]).await;
    swiss.report_match(&doomed, Some(a[0]), Some(a[1])).await.unwrap();

    assert!(swiss.delete_tournament(&doomed).await.unwrap());

    assert!(swiss.get_tournament(&doomed_id).await.unwrap().is_none());
    assert_eq!(swiss.count_players(&doomed).await.unwrap(), 0);
    assert!(swiss.player_standings(&doomed).await.unwrap().is_empty());
    assert_eq!(swiss.count_players(&kept).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_all_tournaments() {
    let swiss = SwissTournament::in_memory();
    let first = Scope::from(swiss.create_tournament("First").await.unwrap());
    swiss.create_tournament("Second").await.unwrap();
    register_all(&swiss, &first, &["Alice"]).await;
    register_all(&swiss, &Scope::Global, &["Bob"]).await;

    assert_eq!(swiss.delete_all_tournaments().await.unwrap(), 2);

    assert!(swiss.list_tournaments().await.unwrap().is_empty());
    assert_eq!(swiss.count_players(&first).await.unwrap(), 0);
    assert_eq!(swiss.count_players(&Scope::Global).await.unwrap(), 1);
}

#[tokio::test]
async fn test_validation_happens_before_writes() {
    let (swiss, scope) = setup_tournament("Strict").await;
    let ids = register_all(&swiss, &scope, &["Alice", "Bob"]).await;

    let err = swiss
        .report_match(&scope, Some(ids[0]), Some(ids[0]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Validation(ValidationError::SelfMatch(_))
    ));

    let err = swiss
        .report_match(&Scope::Global, Some(ids[0]), Some(ids[1]))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let standings = swiss.player_standings(&scope).await.unwrap();
    assert!(standings.iter().all(|s| s.matches == 0));
}

#[tokio::test]
async fn test_empty_inputs_are_noops() {
    let (swiss, scope) = setup_tournament("Quiet").await;
    let ids = register_all(&swiss, &scope, &["Alice"]).await;

    assert!(swiss.register_player(&scope, "").await.unwrap().is_none());
    assert!(swiss.report_match(&scope, Some(ids[0]), None).await.unwrap().is_none());
    assert_eq!(swiss.count_players(&scope).await.unwrap(), 1);

    assert!(matches!(
        swiss.create_tournament("").await,
        Err(TournamentError::Validation(ValidationError::EmptyTournamentName))
    ));
}

#[tokio::test]
async fn test_global_and_named_scopes_are_isolated() {
    let (swiss, scope) = setup_tournament("Named").await;
    register_all(&swiss, &Scope::Global, &["Alice", "Bob"]).await;
    register_all(&swiss, &scope, &["Carol"]).await;

    assert_eq!(swiss.count_players(&Scope::Global).await.unwrap(), 2);
    assert_eq!(swiss.count_players(&scope).await.unwrap(), 1);
    assert_eq!(swiss.swiss_pairings(&Scope::Global).await.unwrap().len(), 1);
}

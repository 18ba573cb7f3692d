// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nearby-player search: radius filtering, position fallback, dedupe,
//! and distance presentation.

mod common;

#[tokio::test]
async fn test_players_within_radius_sorted_by_distance() {
    let app = common::test_app();
    common::seed_profile(&app.db, "me", "Me", Some((0.0, 0.0)), true).await;
    common::seed_profile(&app.db, "bob", "Bob", Some((0.05, 0.0)), true).await;
    common::seed_profile(&app.db, "carol", "Carol", Some((0.01, 0.0)), true).await;
    common::seed_profile(&app.db, "dora", "Dora", Some((0.2, 0.0)), true).await;

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, Some("me"))
        .await
        .unwrap();

    let uids: Vec<&str> = players.iter().map(|p| p.uid.as_str()).collect();
    assert_eq!(uids, vec!["carol", "bob"], "nearest first, 22 km away dropped");

    // ~1.11 km and ~5.56 km, rounded to one decimal
    assert_eq!(players[0].distance_km, 1.1);
    assert_eq!(players[1].distance_km, 5.6);
}

#[tokio::test]
async fn test_caller_is_excluded() {
    let app = common::test_app();
    common::seed_profile(&app.db, "me", "Me", Some((0.0, 0.0)), true).await;

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, Some("me"))
        .await
        .unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn test_incomplete_onboarding_is_filtered() {
    let app = common::test_app();
    common::seed_profile(&app.db, "bob", "Bob", Some((0.01, 0.0)), false).await;
    common::seed_profile(&app.db, "carol", "Carol", Some((0.01, 0.0)), true).await;

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, None)
        .await
        .unwrap();

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].uid, "carol");
}

#[tokio::test]
async fn test_position_falls_back_to_latest_activity() {
    let app = common::test_app();
    let bob = common::auth_user("bob");

    // No coordinates on the profile
    common::seed_profile(&app.db, "bob", "Bob", None, true).await;

    // Position comes from the creator coordinates of the latest activity
    app.state
        .activities
        .create(&bob, common::new_activity(0.03, 0.0, 1))
        .await
        .unwrap();

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, None)
        .await
        .unwrap();

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].uid, "bob");
    assert_eq!(players[0].latitude, 0.03);
    assert_eq!(players[0].distance_km, 3.3);
}

#[tokio::test]
async fn test_profile_position_wins_over_activity_fallback() {
    let app = common::test_app();
    let bob = common::auth_user("bob");

    // Profile says far away, the latest activity was nearby
    common::seed_profile(&app.db, "bob", "Bob", Some((5.0, 5.0)), true).await;
    app.state
        .activities
        .create(&bob, common::new_activity(0.01, 0.0, 1))
        .await
        .unwrap();

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, None)
        .await
        .unwrap();
    assert!(players.is_empty(), "profile coordinates take precedence");
}

#[tokio::test]
async fn test_players_without_any_position_are_skipped() {
    let app = common::test_app();
    common::seed_profile(&app.db, "bob", "Bob", None, true).await;

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, None)
        .await
        .unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn test_duplicate_profiles_deduped_by_uid() {
    let app = common::test_app();
    // Two profile documents for the same uid (signup retry artifact)
    common::seed_profile(&app.db, "bob", "Bob", Some((0.01, 0.0)), true).await;
    common::seed_profile(&app.db, "bob", "Bob", Some((0.02, 0.0)), true).await;

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.0, 10.0, None)
        .await
        .unwrap();
    assert_eq!(players.len(), 1);
}

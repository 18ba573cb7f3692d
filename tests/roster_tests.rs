// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Participant roster: idempotency and fullness detection.

use matchpoint::error::AppError;

mod common;

#[tokio::test]
async fn test_add_participant_is_idempotent() {
    let app = common::test_app();
    let owner = common::auth_user("owner");
    let activity = app
        .state
        .activities
        .create(&owner, common::new_activity(0.0, 0.0, 2))
        .await
        .unwrap();

    let first = app
        .state
        .roster
        .add_participant(&activity.id, "bob", "Bob", None)
        .await
        .unwrap();
    assert!(!first.is_full);
    assert!(!first.should_create_scheduled);

    let second = app
        .state
        .roster
        .add_participant(&activity.id, "bob", "Bob", None)
        .await
        .unwrap();
    assert!(!second.is_full, "repeat add must report the default outcome");
    assert!(!second.should_create_scheduled);

    let participants = app.state.roster.participants(&activity.id).await.unwrap();
    assert_eq!(participants.len(), 1, "exactly one roster record per user");
    assert_eq!(participants[0].user_id, "bob");
    assert_eq!(participants[0].user_name, "Bob");
}

#[tokio::test]
async fn test_fullness_transition_at_required_members() {
    let app = common::test_app();
    let owner = common::auth_user("owner");
    let activity = app
        .state
        .activities
        .create(&owner, common::new_activity(0.0, 0.0, 2))
        .await
        .unwrap();

    let first = app
        .state
        .roster
        .add_participant(&activity.id, "bob", "Bob", None)
        .await
        .unwrap();
    assert!(!first.is_full);

    let second = app
        .state
        .roster
        .add_participant(&activity.id, "carol", "Carol", None)
        .await
        .unwrap();
    assert!(second.is_full);
    assert!(second.should_create_scheduled);

    assert_eq!(app.state.roster.joined_count(&activity.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_required_members_defaults_to_one() {
    let app = common::test_app();
    let owner = common::auth_user("owner");
    // A zero target still means one participant fills the roster
    let activity = app
        .state
        .activities
        .create(&owner, common::new_activity(0.0, 0.0, 0))
        .await
        .unwrap();

    let outcome = app
        .state
        .roster
        .add_participant(&activity.id, "bob", "Bob", None)
        .await
        .unwrap();
    assert!(outcome.is_full);
}

#[tokio::test]
async fn test_add_participant_unknown_activity() {
    let app = common::test_app();

    let err = app
        .state
        .roster
        .add_participant("missing", "bob", "Bob", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

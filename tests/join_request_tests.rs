// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Join-request lifecycle: duplicate prevention and the terminal
//! accepted/declined state machine.

use matchpoint::error::AppError;
use matchpoint::models::{NewJoinRequest, RequestStatus};

mod common;

fn request_for(activity_id: &str, recipient: &str) -> NewJoinRequest {
    NewJoinRequest {
        recipient_uid: recipient.to_string(),
        activity_id: activity_id.to_string(),
    }
}

#[tokio::test]
async fn test_create_join_request_snapshots_sender() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");
    common::seed_profile(&app.db, "alice", "Alice", None, true).await;
    common::seed_profile(&app.db, "bob", "Bob", None, true).await;

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();

    let request = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.sender_name, "Bob");
    assert_eq!(request.activity_name, "tennis");
    assert!(!request.id.is_empty());
    assert!(!request.created_at.is_empty());

    // Best-effort push went to the recipient
    let sent = app.push.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].to.contains("alice"));
    assert!(sent[0].body.contains("Bob"));
}

#[tokio::test]
async fn test_duplicate_pending_request_is_rejected() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();

    app.state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    let err = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));
}

#[tokio::test]
async fn test_new_request_allowed_after_decline() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();

    let first = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();
    app.state.requests.decline(&first.id, &alice).await.unwrap();

    // The pending-uniqueness guard only counts pending requests
    let second = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();
    assert_eq!(second.status, RequestStatus::Pending);
}

#[tokio::test]
async fn test_request_for_unknown_activity() {
    let app = common::test_app();
    let bob = common::auth_user("bob");

    let err = app
        .state
        .requests
        .create(&bob, request_for("missing", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_accept_unknown_request() {
    let app = common::test_app();
    let alice = common::auth_user("alice");

    let err = app.state.requests.accept("missing", &alice).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_terminal_states_are_final() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 5))
        .await
        .unwrap();
    let request = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    app.state.requests.accept(&request.id, &alice).await.unwrap();

    let again = app.state.requests.accept(&request.id, &alice).await.unwrap_err();
    assert!(matches!(again, AppError::InvalidTransition(_)));

    let decline = app
        .state
        .requests
        .decline(&request.id, &alice)
        .await
        .unwrap_err();
    assert!(matches!(decline, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_only_recipient_can_resolve() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");
    let mallory = common::auth_user("mallory");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();
    let request = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    let err = app
        .state
        .requests
        .accept(&request.id, &mallory)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Still pending for the real recipient
    let stored = app.db.get_join_request(&request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Pending);
}

#[tokio::test]
async fn test_decline_has_no_roster_side_effect() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();
    let request = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    app.state.requests.decline(&request.id, &alice).await.unwrap();

    let stored = app.db.get_join_request(&request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Declined);
    assert!(stored.updated_at.is_some());
    assert_eq!(app.state.roster.joined_count(&activity.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_notification_feed_is_newest_first() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");
    let carol = common::auth_user("carol");

    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 5))
        .await
        .unwrap();

    let first = app
        .state
        .requests
        .create(&bob, request_for(&activity.id, "alice"))
        .await
        .unwrap();
    let second = app
        .state
        .requests
        .create(&carol, request_for(&activity.id, "alice"))
        .await
        .unwrap();

    let feed = app.state.requests.list_for_recipient("alice").await.unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].id, second.id);
    assert_eq!(feed[1].id, first.id);
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end join flow: discover, request, accept, scheduled.

use matchpoint::models::NewJoinRequest;

mod common;

#[tokio::test]
async fn test_full_join_flow_for_two_players() {
    let app = common::test_app();
    let alice = common::auth_user("alice");
    let bob = common::auth_user("bob");
    common::seed_profile(&app.db, "alice", "Alice", Some((0.0, 0.0)), true).await;
    common::seed_profile(&app.db, "bob", "Bob", Some((0.0, 0.001)), true).await;

    // Alice posts a singles match at the origin
    let activity = app
        .state
        .activities
        .create(&alice, common::new_activity(0.0, 0.0, 1))
        .await
        .unwrap();

    // Bob, ~0.1 km away, sees it and the creator as nearby
    let visible = app
        .state
        .activities
        .list_within_radius(0.0, 0.001, 5.0, Some("bob"))
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, activity.id);

    let players = app
        .state
        .nearby
        .nearby_players(0.0, 0.001, 5.0, Some("bob"))
        .await
        .unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].uid, "alice");
    assert_eq!(players[0].distance_km, 0.1);

    // Bob asks to join; Alice sees it in her feed and accepts
    let request = app
        .state
        .requests
        .create(
            &bob,
            NewJoinRequest {
                recipient_uid: "alice".to_string(),
                activity_id: activity.id.clone(),
            },
        )
        .await
        .unwrap();

    let feed = app.state.requests.list_for_recipient("alice").await.unwrap();
    assert_eq!(feed.len(), 1);

    app.state.requests.accept(&request.id, &alice).await.unwrap();

    // Roster holds exactly Bob, and the activity is full
    let participants = app.state.roster.participants(&activity.id).await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].user_id, "bob");

    // Exactly two scheduled records, cross-referencing each other
    let alices = app.db.scheduled_for_user("alice").await.unwrap();
    let bobs = app.db.scheduled_for_user("bob").await.unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(bobs.len(), 1);

    assert_eq!(alices[0].partner_user_id, "bob");
    assert_eq!(alices[0].partner_name, "Bob");
    assert_eq!(bobs[0].partner_user_id, "alice");
    assert_eq!(bobs[0].partner_name, "Alice");
    assert_eq!(alices[0].activity_id, activity.id);
    assert_eq!(bobs[0].activity_id, activity.id);

    // Pushes: join request to Alice, acceptance to Bob
    let sent = app.push.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].to.contains("alice"));
    assert!(sent[1].to.contains("bob"));

    // Reminders queued for both members, one hour before start
    let reminders = app.tasks.queued_reminders();
    assert_eq!(reminders.len(), 2);
    assert!(reminders
        .iter()
        .all(|(_, when)| when.to_rfc3339() == "2030-06-01T17:00:00+00:00"));
}

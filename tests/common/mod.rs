// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use matchpoint::config::Config;
use matchpoint::db::Db;
use matchpoint::middleware::auth::AuthUser;
use matchpoint::models::{NewActivity, UserProfile};
use matchpoint::routes::create_router;
use matchpoint::services::{
    ActivityService, JoinRequestService, NearbyService, PushService, RosterService,
    ScheduledActivityService, TasksService,
};
use matchpoint::AppState;
use std::sync::Arc;

/// Memory-backed app plus handles to the recording push/tasks backends.
#[allow(dead_code)]
pub struct TestApp {
    pub state: Arc<AppState>,
    pub db: Db,
    pub push: PushService,
    pub tasks: TasksService,
    pub scheduled: ScheduledActivityService,
}

/// Build a test app against the in-memory store.
#[allow(dead_code)]
pub fn test_app() -> TestApp {
    let config = Config::test_default();
    let db = Db::in_memory();
    let push = PushService::noop(db.clone());
    let tasks = TasksService::noop();

    let activities = ActivityService::new(db.clone());
    let roster = RosterService::new(db.clone());
    let scheduled =
        ScheduledActivityService::new(db.clone(), tasks.clone(), config.service_url.clone());
    let requests = JoinRequestService::new(
        db.clone(),
        roster.clone(),
        scheduled.clone(),
        push.clone(),
    );
    let nearby = NearbyService::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db: db.clone(),
        activities,
        roster,
        requests,
        nearby,
        push: push.clone(),
    });

    TestApp {
        state,
        db,
        push,
        tasks,
        scheduled,
    }
}

#[allow(dead_code)]
pub fn router(app: &TestApp) -> axum::Router {
    create_router(app.state.clone())
}

#[allow(dead_code)]
pub fn auth_user(uid: &str) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
    }
}

/// Seed a profile; position and onboarding are the fields the matching
/// logic cares about.
#[allow(dead_code)]
pub async fn seed_profile(
    db: &Db,
    uid: &str,
    name: &str,
    position: Option<(f64, f64)>,
    onboarded: bool,
) -> UserProfile {
    let profile = UserProfile {
        id: String::new(),
        uid: uid.to_string(),
        name: name.to_string(),
        email: Some(format!("{}@example.com", uid)),
        phone: None,
        date_of_birth: None,
        gender: None,
        country: None,
        city: None,
        profile_image: None,
        activities: vec!["tennis".to_string()],
        expertise_level: Some("intermediate".to_string()),
        onboarding_completed: onboarded,
        latitude: position.map(|p| p.0),
        longitude: position.map(|p| p.1),
        push_token: Some(format!("ExponentPushToken[{}]", uid)),
        created_at: String::new(),
    };
    db.insert_profile(&profile).await.expect("seed profile")
}

/// Activity input at a venue, far enough in the future that reminders
/// are queued.
#[allow(dead_code)]
pub fn new_activity(lat: f64, lon: f64, required_members: u32) -> NewActivity {
    NewActivity {
        creator_lat: lat,
        creator_long: lon,
        location: "City Park Courts".to_string(),
        location_lat: lat,
        location_long: lon,
        activity: "tennis".to_string(),
        level: "intermediate".to_string(),
        date: "2030-06-01".to_string(),
        time: "18:00".to_string(),
        notes: None,
        video_uri: None,
        required_members,
    }
}

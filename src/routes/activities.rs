// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes: creation, proximity listing, rosters, schedule.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityParticipant, NewActivity, ScheduledActivity};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_RADIUS_KM: f64 = 10.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(create_activity))
        .route("/api/activities/nearby", get(nearby_activities))
        .route("/api/activities/mine", get(my_activities))
        .route("/api/activities/{id}", get(get_activity))
        .route("/api/activities/{id}/participants", get(get_participants))
        .route("/api/schedule", get(my_schedule))
}

/// Proximity query parameters, shared with the player search.
#[derive(Deserialize)]
pub(crate) struct ProximityQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_radius")]
    pub radius_km: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_KM
}

/// Create an activity owned by the caller.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<NewActivity>,
) -> Result<Json<Activity>> {
    let activity = state.activities.create(&user, input).await?;
    Ok(Json(activity))
}

/// Recent activities near a point, excluding the caller's own.
async fn nearby_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ProximityQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state
        .activities
        .list_within_radius(query.lat, query.lon, query.radius_km, Some(&user.uid))
        .await?;
    Ok(Json(activities))
}

/// The caller's own activities.
async fn my_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.activities.list_for_user(&user.uid).await?))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    let activity = state
        .activities
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
    Ok(Json(activity))
}

async fn get_participants(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActivityParticipant>>> {
    Ok(Json(state.roster.participants(&id).await?))
}

/// The caller's confirmed (scheduled) activities, soonest first.
async fn my_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ScheduledActivity>>> {
    Ok(Json(state.db.scheduled_for_user(&user.uid).await?))
}

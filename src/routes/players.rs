// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nearby-player search route.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::routes::activities::ProximityQuery;
use crate::services::NearbyPlayer;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/players/nearby", get(nearby_players))
}

/// Players near a point, nearest first, excluding the caller.
async fn nearby_players(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ProximityQuery>,
) -> Result<Json<Vec<NearbyPlayer>>> {
    let players = state
        .nearby
        .nearby_players(query.lat, query.lon, query.radius_km, Some(&user.uid))
        .await?;
    Ok(Json(players))
}

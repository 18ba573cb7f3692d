// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Join-request routes: create, notification feed, accept, decline.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{JoinRequest, NewJoinRequest};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/requests", post(create_request))
        .route("/api/requests/{id}/accept", post(accept_request))
        .route("/api/requests/{id}/decline", post(decline_request))
        .route("/api/notifications", get(list_notifications))
}

/// Send a join request for an activity.
async fn create_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<NewJoinRequest>,
) -> Result<Json<JoinRequest>> {
    let request = state.requests.create(&user, input).await?;
    Ok(Json(request))
}

/// The caller's notification feed: join requests addressed to them,
/// newest first.
async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<JoinRequest>>> {
    Ok(Json(state.requests.list_for_recipient(&user.uid).await?))
}

#[derive(Serialize)]
struct ResolveResponse {
    success: bool,
}

/// Accept a pending join request addressed to the caller.
async fn accept_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ResolveResponse>> {
    state.requests.accept(&id, &user).await?;
    Ok(Json(ResolveResponse { success: true }))
}

/// Decline a pending join request addressed to the caller.
async fn decline_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ResolveResponse>> {
    state.requests.decline(&id, &user).await?;
    Ok(Json(ResolveResponse { success: true }))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task handler routes for Cloud Tasks callbacks.
//!
//! These endpoints are called by Cloud Tasks, not directly by users. Each
//! request carries the shared verify token configured on the queue.

use crate::services::tasks::ReminderPayload;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/send-reminder", post(send_reminder))
}

/// Deliver a queued activity reminder (called by Cloud Tasks).
async fn send_reminder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ReminderPayload>,
) -> StatusCode {
    let token = headers
        .get("x-tasks-token")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    if token != state.config.tasks_verify_token {
        tracing::warn!("Rejected reminder callback with bad verify token");
        return StatusCode::UNAUTHORIZED;
    }

    // Reminders are best-effort; returning an error here would make Cloud
    // Tasks retry a push that is allowed to fail.
    if let Err(e) = state
        .push
        .send_to_user(
            &payload.user_id,
            &payload.title,
            &payload.body,
            serde_json::json!({
                "type": "activity_reminder",
                "scheduled_activity_id": payload.scheduled_activity_id,
            }),
        )
        .await
    {
        tracing::warn!(
            user_id = %payload.user_id,
            error = %e,
            "Reminder push failed"
        );
    }

    match state
        .db
        .mark_notification_sent(&payload.scheduled_activity_id)
        .await
    {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(
                scheduled_id = %payload.scheduled_activity_id,
                error = %e,
                "Failed to mark reminder as sent"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes for the authenticated user.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(put_me))
        .route("/api/me/onboarding", get(get_onboarding))
}

/// Get the caller's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for {} not found", user.uid)))?;
    Ok(Json(profile))
}

/// Upsert request: the whole profile minus identity and bookkeeping fields.
#[derive(Deserialize)]
struct UpsertProfileRequest {
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    profile_image: Option<String>,
    #[serde(default)]
    activities: Vec<String>,
    #[serde(default)]
    expertise_level: Option<String>,
    #[serde(default)]
    onboarding_completed: bool,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    push_token: Option<String>,
}

/// Create or replace the caller's profile.
async fn put_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<UpsertProfileRequest>,
) -> Result<Json<UserProfile>> {
    let profile = UserProfile {
        id: String::new(),
        uid: user.uid.clone(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        date_of_birth: input.date_of_birth,
        gender: input.gender,
        country: input.country,
        city: input.city,
        profile_image: input.profile_image,
        activities: input.activities,
        expertise_level: input.expertise_level,
        onboarding_completed: input.onboarding_completed,
        latitude: input.latitude,
        longitude: input.longitude,
        push_token: input.push_token,
        created_at: String::new(),
    };

    let stored = match state.db.get_profile(&user.uid).await? {
        Some(existing) => {
            let mut fields = serde_json::to_value(&profile).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("serialize profile update: {}", e))
            })?;
            if let Some(map) = fields.as_object_mut() {
                // Identity and bookkeeping fields stay as stored
                map.remove("id");
                map.remove("uid");
                map.remove("created_at");
            }
            state.db.update_profile(&existing.id, fields).await?;
            state.db.get_profile(&user.uid).await?.ok_or_else(|| {
                AppError::Database("Profile disappeared during update".to_string())
            })?
        }
        None => state.db.insert_profile(&profile).await?,
    };

    Ok(Json(stored))
}

#[derive(Serialize)]
struct OnboardingResponse {
    completed: bool,
}

/// Onboarding gate for the app shell. Degrades to `false` when the store
/// is unreachable.
async fn get_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<OnboardingResponse>> {
    let completed = state.db.onboarding_completed(&user.uid).await?;
    Ok(Json(OnboardingResponse { completed }))
}

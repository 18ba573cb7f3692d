// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model.

use serde::{Deserialize, Serialize};

/// User profile stored in the `users` collection, one per auth uid.
///
/// Mutated by the owning user only; never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Document id (store-assigned at insert)
    #[serde(default)]
    pub id: String,
    /// Auth provider uid
    pub uid: String,
    /// Display name
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// Profile picture URL
    pub profile_image: Option<String>,
    /// Interest tags ("tennis", "running", ...)
    #[serde(default)]
    pub activities: Vec<String>,
    pub expertise_level: Option<String>,
    /// Whether the signup flow was completed
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Last known position, when the device shared one
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Expo push token, when the device registered one
    pub push_token: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl UserProfile {
    /// Position for proximity search, when the profile carries one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity models: the event itself and its accepted participants.

use serde::{Deserialize, Serialize};

/// A user-created activity stored in the `activities` collection.
///
/// Immutable once created; joining happens through join requests and the
/// participant roster, never by editing the activity itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Document id (store-assigned at insert)
    #[serde(default)]
    pub id: String,
    /// Creator's auth uid
    pub creator_uid: String,
    /// Creator position when the activity was posted
    pub creator_lat: f64,
    pub creator_long: f64,
    /// Venue display name
    pub location: String,
    /// Venue coordinates (used for radius filtering)
    pub location_lat: f64,
    pub location_long: f64,
    /// Activity type ("tennis", "football", ...)
    pub activity: String,
    /// Expected skill level
    pub level: String,
    /// Activity date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM)
    pub time: String,
    pub notes: Option<String>,
    /// Stored as an explicit null when absent
    pub video_uri: Option<String>,
    /// Target headcount besides the creator
    pub required_members: u32,
    #[serde(default)]
    pub created_at: String,
}

fn default_required_members() -> u32 {
    1
}

/// Input for creating an activity. The creator uid comes from the session
/// and `id`/`created_at` are store-assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub creator_lat: f64,
    pub creator_long: f64,
    pub location: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub activity: String,
    pub level: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub video_uri: Option<String>,
    #[serde(default = "default_required_members")]
    pub required_members: u32,
}

/// Roster membership status. Only `Accepted` is produced by this workflow;
/// pending asks live in `join_requests` (see [`crate::models::RequestStatus`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Accepted,
}

/// Roster record: one accepted participant of one activity.
///
/// The `(activity_id, user_id)` pair is unique by convention, enforced by
/// a pre-write existence check rather than a store constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityParticipant {
    #[serde(default)]
    pub id: String,
    pub activity_id: String,
    pub user_id: String,
    pub status: ParticipantStatus,
    /// Display snapshot taken at accept time
    pub user_name: String,
    pub user_profile_image: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

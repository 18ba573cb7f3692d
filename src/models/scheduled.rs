// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Confirmed-attendance records created when an activity fills up.

use serde::{Deserialize, Serialize};

/// One per `(activity_id, user_id)` once the roster reaches the required
/// headcount. Denormalized copy of the activity fields so the schedule
/// screen renders without a second fetch.
///
/// `partner_name` carries every other member; `partner_user_id` and
/// `partner_image` keep only the first other member. The stored shape is
/// 1:1 even for group activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledActivity {
    #[serde(default)]
    pub id: String,
    pub activity_id: String,
    /// The member this record belongs to
    pub user_id: String,
    pub activity: String,
    pub level: String,
    pub location: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
    /// First other member of the activity
    pub partner_user_id: String,
    pub partner_image: Option<String>,
    /// Comma-joined names of every other member
    pub partner_name: String,
    /// Flipped by the reminder callback once the push went out
    pub notification_sent: bool,
    /// Cloud Tasks task name of the queued reminder
    pub notification_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

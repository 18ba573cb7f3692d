// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: generic document store plus typed collection wrappers.

pub mod firestore;
pub mod memory;
pub mod store;

pub use store::{DocumentStore, Filter, OrderDirection};

use crate::error::AppError;
use crate::models::{
    Activity, ActivityParticipant, JoinRequest, RequestStatus, ScheduledActivity, UserProfile,
};
use crate::time_utils;
use serde_json::json;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    pub const PARTICIPANTS: &str = "activity_participants";
    pub const JOIN_REQUESTS: &str = "join_requests";
    /// Per-user confirmed attendance records
    pub const SCHEDULED_ACTIVITIES: &str = "scheduled_activities";
}

/// Typed operations over the shared document store.
#[derive(Clone)]
pub struct Db {
    store: DocumentStore,
}

impl Db {
    /// Firestore-backed database.
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            store: DocumentStore::firestore(project_id).await?,
        })
    }

    /// In-memory database for tests and local development.
    pub fn in_memory() -> Self {
        Self {
            store: DocumentStore::in_memory(),
        }
    }

    /// Disconnected database: every operation fails with an offline error.
    pub fn offline() -> Self {
        Self {
            store: DocumentStore::offline(),
        }
    }

    // ─── User Profiles ───────────────────────────────────────────

    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let mut profiles: Vec<UserProfile> = self
            .store
            .query(collections::USERS, &[Filter::eq("uid", uid)], None, Some(1))
            .await?;
        Ok(profiles.pop())
    }

    pub async fn insert_profile(&self, profile: &UserProfile) -> Result<UserProfile, AppError> {
        self.store.insert(collections::USERS, profile).await
    }

    pub async fn update_profile(
        &self,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), AppError> {
        self.store.update(collections::USERS, id, fields).await
    }

    pub async fn all_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        self.store.query(collections::USERS, &[], None, None).await
    }

    /// Onboarding gate. Degrades to `false` when the store is unreachable
    /// rather than blocking the caller on a transient outage.
    pub async fn onboarding_completed(&self, uid: &str) -> Result<bool, AppError> {
        match self.get_profile(uid).await {
            Ok(profile) => Ok(profile.map(|p| p.onboarding_completed).unwrap_or(false)),
            Err(e) if e.is_unavailable() => {
                tracing::warn!(uid, "Store unavailable, treating onboarding as incomplete");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    // ─── Activities ──────────────────────────────────────────────

    pub async fn insert_activity(&self, activity: &Activity) -> Result<Activity, AppError> {
        self.store.insert(collections::ACTIVITIES, activity).await
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        self.store.get_by_id(collections::ACTIVITIES, id).await
    }

    /// The most recent activities across all users, newest first.
    pub async fn recent_activities(&self, limit: u32) -> Result<Vec<Activity>, AppError> {
        self.store
            .query(
                collections::ACTIVITIES,
                &[],
                Some(("created_at", OrderDirection::Descending)),
                Some(limit),
            )
            .await
    }

    pub async fn activities_for_user(&self, uid: &str) -> Result<Vec<Activity>, AppError> {
        self.store
            .query(
                collections::ACTIVITIES,
                &[Filter::eq("creator_uid", uid)],
                Some(("created_at", OrderDirection::Descending)),
                None,
            )
            .await
    }

    /// Full activity scan, newest first. Feeds the nearby-player position
    /// fallback.
    pub async fn all_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.store
            .query(
                collections::ACTIVITIES,
                &[],
                Some(("created_at", OrderDirection::Descending)),
                None,
            )
            .await
    }

    // ─── Participant Roster ──────────────────────────────────────

    pub async fn participants_for_activity(
        &self,
        activity_id: &str,
    ) -> Result<Vec<ActivityParticipant>, AppError> {
        self.store
            .query(
                collections::PARTICIPANTS,
                &[Filter::eq("activity_id", activity_id)],
                None,
                None,
            )
            .await
    }

    pub async fn find_participant(
        &self,
        activity_id: &str,
        user_id: &str,
    ) -> Result<Option<ActivityParticipant>, AppError> {
        let mut matches: Vec<ActivityParticipant> = self
            .store
            .query(
                collections::PARTICIPANTS,
                &[
                    Filter::eq("activity_id", activity_id),
                    Filter::eq("user_id", user_id),
                ],
                None,
                Some(1),
            )
            .await?;
        Ok(matches.pop())
    }

    pub async fn insert_participant(
        &self,
        participant: &ActivityParticipant,
    ) -> Result<ActivityParticipant, AppError> {
        self.store
            .insert(collections::PARTICIPANTS, participant)
            .await
    }

    // ─── Join Requests ───────────────────────────────────────────

    pub async fn insert_join_request(
        &self,
        request: &JoinRequest,
    ) -> Result<JoinRequest, AppError> {
        self.store.insert(collections::JOIN_REQUESTS, request).await
    }

    pub async fn get_join_request(&self, id: &str) -> Result<Option<JoinRequest>, AppError> {
        self.store.get_by_id(collections::JOIN_REQUESTS, id).await
    }

    pub async fn pending_request_exists(
        &self,
        recipient_uid: &str,
        sender_uid: &str,
        activity_id: &str,
    ) -> Result<bool, AppError> {
        let matches: Vec<JoinRequest> = self
            .store
            .query(
                collections::JOIN_REQUESTS,
                &[
                    Filter::eq("recipient_uid", recipient_uid),
                    Filter::eq("sender_uid", sender_uid),
                    Filter::eq("activity_id", activity_id),
                    Filter::eq("status", RequestStatus::Pending),
                ],
                None,
                Some(1),
            )
            .await?;
        Ok(!matches.is_empty())
    }

    pub async fn requests_for_recipient(&self, uid: &str) -> Result<Vec<JoinRequest>, AppError> {
        self.store
            .query(
                collections::JOIN_REQUESTS,
                &[Filter::eq("recipient_uid", uid)],
                Some(("created_at", OrderDirection::Descending)),
                None,
            )
            .await
    }

    pub async fn set_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<(), AppError> {
        self.store
            .update(
                collections::JOIN_REQUESTS,
                id,
                json!({
                    "status": status,
                    "updated_at": time_utils::now_rfc3339(),
                }),
            )
            .await
    }

    // ─── Scheduled Activities ────────────────────────────────────

    pub async fn scheduled_exists(
        &self,
        activity_id: &str,
        user_id: &str,
    ) -> Result<bool, AppError> {
        let matches: Vec<ScheduledActivity> = self
            .store
            .query(
                collections::SCHEDULED_ACTIVITIES,
                &[
                    Filter::eq("activity_id", activity_id),
                    Filter::eq("user_id", user_id),
                ],
                None,
                Some(1),
            )
            .await?;
        Ok(!matches.is_empty())
    }

    pub async fn insert_scheduled(
        &self,
        scheduled: &ScheduledActivity,
    ) -> Result<ScheduledActivity, AppError> {
        self.store
            .insert(collections::SCHEDULED_ACTIVITIES, scheduled)
            .await
    }

    pub async fn get_scheduled(&self, id: &str) -> Result<Option<ScheduledActivity>, AppError> {
        self.store
            .get_by_id(collections::SCHEDULED_ACTIVITIES, id)
            .await
    }

    /// A user's confirmed activities, soonest date first.
    pub async fn scheduled_for_user(
        &self,
        uid: &str,
    ) -> Result<Vec<ScheduledActivity>, AppError> {
        self.store
            .query(
                collections::SCHEDULED_ACTIVITIES,
                &[Filter::eq("user_id", uid)],
                Some(("date", OrderDirection::Ascending)),
                None,
            )
            .await
    }

    pub async fn set_reminder_queued(
        &self,
        id: &str,
        notification_id: &str,
    ) -> Result<(), AppError> {
        self.store
            .update(
                collections::SCHEDULED_ACTIVITIES,
                id,
                json!({ "notification_id": notification_id }),
            )
            .await
    }

    pub async fn mark_notification_sent(&self, id: &str) -> Result<(), AppError> {
        self.store
            .update(
                collections::SCHEDULED_ACTIVITIES,
                id,
                json!({ "notification_sent": true }),
            )
            .await
    }
}

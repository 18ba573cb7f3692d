// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Participant roster: idempotent membership and fullness detection.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{ActivityParticipant, ParticipantStatus};

/// Outcome of an [`RosterService::add_participant`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOutcome {
    /// The roster reached the activity's required headcount.
    pub is_full: bool,
    /// This call completed the roster; the caller should fan out
    /// scheduled activities.
    pub should_create_scheduled: bool,
}

#[derive(Clone)]
pub struct RosterService {
    db: Db,
}

impl RosterService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Add an accepted participant. A repeat call for the same
    /// `(activity, user)` pair is a no-op returning the default outcome.
    ///
    /// Check-then-insert: two concurrent calls can both pass the existence
    /// check, since the store offers no compound uniqueness constraint.
    pub async fn add_participant(
        &self,
        activity_id: &str,
        user_id: &str,
        user_name: &str,
        profile_image: Option<String>,
    ) -> Result<AddOutcome> {
        if self.db.find_participant(activity_id, user_id).await?.is_some() {
            tracing::debug!(activity_id, user_id, "Participant already on roster, skipping");
            return Ok(AddOutcome::default());
        }

        let participant = ActivityParticipant {
            id: String::new(),
            activity_id: activity_id.to_string(),
            user_id: user_id.to_string(),
            status: ParticipantStatus::Accepted,
            user_name: user_name.to_string(),
            user_profile_image: profile_image,
            created_at: String::new(),
        };
        self.db.insert_participant(&participant).await?;

        // Re-fetch after the insert so fullness reflects the new roster.
        let activity = self
            .db
            .get_activity(activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;
        let joined = self.joined_count(activity_id).await?;
        let required = activity.required_members.max(1) as usize;
        let is_full = joined >= required;

        tracing::info!(
            activity_id,
            user_id,
            joined,
            required,
            is_full,
            "Participant added"
        );

        Ok(AddOutcome {
            is_full,
            should_create_scheduled: is_full,
        })
    }

    pub async fn participants(&self, activity_id: &str) -> Result<Vec<ActivityParticipant>> {
        self.db.participants_for_activity(activity_id).await
    }

    /// Number of accepted participants.
    pub async fn joined_count(&self, activity_id: &str) -> Result<usize> {
        Ok(self.db.participants_for_activity(activity_id).await?.len())
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Join-request workflow: create, list, accept, decline.
//!
//! A pending request resolves to accepted or declined; both outcomes are
//! terminal. Accepting a request updates the roster and, when the roster
//! fills, triggers the scheduled-activity fan-out.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{JoinRequest, NewJoinRequest, RequestStatus};
use crate::services::push::PushService;
use crate::services::roster::RosterService;
use crate::services::scheduled::ScheduledActivityService;
use serde_json::json;

#[derive(Clone)]
pub struct JoinRequestService {
    db: Db,
    roster: RosterService,
    scheduled: ScheduledActivityService,
    push: PushService,
}

impl JoinRequestService {
    pub fn new(
        db: Db,
        roster: RosterService,
        scheduled: ScheduledActivityService,
        push: PushService,
    ) -> Self {
        Self {
            db,
            roster,
            scheduled,
            push,
        }
    }

    /// Create a pending join request from the authenticated sender.
    ///
    /// Duplicate-guarded: at most one pending request per
    /// (recipient, sender, activity) triple. The guard is check-then-write,
    /// so concurrent duplicates remain possible.
    pub async fn create(&self, sender: &AuthUser, input: NewJoinRequest) -> Result<JoinRequest> {
        let activity = self
            .db
            .get_activity(&input.activity_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Activity {} not found", input.activity_id))
            })?;

        if self
            .db
            .pending_request_exists(&input.recipient_uid, &sender.uid, &input.activity_id)
            .await?
        {
            return Err(AppError::Duplicate(
                "A pending join request for this activity already exists".to_string(),
            ));
        }

        let (sender_name, sender_image) = match self.db.get_profile(&sender.uid).await? {
            Some(profile) => (profile.name, profile.profile_image),
            None => (sender.uid.clone(), None),
        };

        let request = JoinRequest {
            id: String::new(),
            recipient_uid: input.recipient_uid,
            sender_uid: sender.uid.clone(),
            activity_id: input.activity_id,
            status: RequestStatus::Pending,
            sender_name: sender_name.clone(),
            sender_image,
            activity_name: activity.activity.clone(),
            created_at: String::new(),
            updated_at: None,
        };
        let stored = self.db.insert_join_request(&request).await?;

        // Fire-and-forget: a push outage must not fail the request.
        if let Err(e) = self
            .push
            .send_to_user(
                &stored.recipient_uid,
                "New join request",
                &format!(
                    "{} wants to join your {} activity",
                    sender_name, stored.activity_name
                ),
                json!({ "type": "join_request", "request_id": stored.id }),
            )
            .await
        {
            tracing::warn!(
                request_id = %stored.id,
                error = %e,
                "Failed to push join-request notification"
            );
        }

        tracing::info!(
            request_id = %stored.id,
            sender = %stored.sender_uid,
            recipient = %stored.recipient_uid,
            "Join request created"
        );
        Ok(stored)
    }

    /// Requests addressed to a recipient, newest first.
    pub async fn list_for_recipient(&self, uid: &str) -> Result<Vec<JoinRequest>> {
        self.db.requests_for_recipient(uid).await
    }

    /// Accept a pending request: status flip, roster add, fan-out when the
    /// roster fills.
    ///
    /// The steps after the status flip are sequential, not transactional; a
    /// crash in between leaves the roster updated with the fan-out pending.
    /// Re-running the fan-out is safe (existence-guarded).
    pub async fn accept(&self, request_id: &str, recipient: &AuthUser) -> Result<()> {
        let request = self.require_pending(request_id, recipient, "accept").await?;
        self.db
            .set_request_status(&request.id, RequestStatus::Accepted)
            .await?;

        let activity = self
            .db
            .get_activity(&request.activity_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Activity {} not found", request.activity_id))
            })?;

        let outcome = self
            .roster
            .add_participant(
                &activity.id,
                &request.sender_uid,
                &request.sender_name,
                request.sender_image.clone(),
            )
            .await?;

        if outcome.should_create_scheduled {
            let participants = self.roster.participants(&activity.id).await?;
            let (creator_name, creator_image) =
                match self.db.get_profile(&activity.creator_uid).await? {
                    Some(profile) => (profile.name, profile.profile_image),
                    None => (activity.creator_uid.clone(), None),
                };
            self.scheduled
                .fan_out(&activity, &creator_name, creator_image, &participants)
                .await?;
        }

        if let Err(e) = self
            .push
            .send_to_user(
                &request.sender_uid,
                "Request accepted",
                &format!(
                    "You're in! Your request to join {} was accepted",
                    request.activity_name
                ),
                json!({ "type": "request_accepted", "activity_id": activity.id }),
            )
            .await
        {
            tracing::warn!(request_id, error = %e, "Failed to push acceptance notification");
        }

        tracing::info!(
            request_id,
            activity_id = %activity.id,
            is_full = outcome.is_full,
            "Join request accepted"
        );
        Ok(())
    }

    /// Decline a pending request. No roster side effect.
    pub async fn decline(&self, request_id: &str, recipient: &AuthUser) -> Result<()> {
        let request = self
            .require_pending(request_id, recipient, "decline")
            .await?;
        self.db
            .set_request_status(&request.id, RequestStatus::Declined)
            .await?;

        tracing::info!(request_id, sender = %request.sender_uid, "Join request declined");
        Ok(())
    }

    /// Fetch a request, enforcing recipient ownership and the terminal-state
    /// rule: accepted/declined requests never change again.
    async fn require_pending(
        &self,
        request_id: &str,
        recipient: &AuthUser,
        action: &str,
    ) -> Result<JoinRequest> {
        let request = self
            .db
            .get_join_request(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Join request {} not found", request_id)))?;

        if request.recipient_uid != recipient.uid {
            return Err(AppError::Forbidden(
                "Only the request recipient can resolve it".to_string(),
            ));
        }

        if request.status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "Cannot {} a request that is already {}",
                action, request.status
            )));
        }
        Ok(request)
    }
}
